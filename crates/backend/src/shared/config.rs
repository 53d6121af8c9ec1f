use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::net::SocketAddr;

/// Environment variable overriding `catalog.upstream_url`
pub const UPSTREAM_URL_ENV: &str = "VELO_UPSTREAM_URL";

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub frontend: FrontendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSettings {
    #[serde(default)]
    pub upstream_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub fallback_on_error: bool,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FrontendSettings {
    pub dist_dir: String,
}

fn default_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> usize {
    contracts::shared::catalog::PAGE_SIZE
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[catalog]
request_timeout_secs = 10
fallback_on_error = true
page_size = 12

[frontend]
dist_dir = "dist"
"#;

impl Config {
    pub fn server_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid server address '{addr}': {e}"))
    }

    /// Env override and sanity fixes after parsing
    fn normalize(mut self, upstream_override: Option<String>) -> Self {
        if let Some(url) = upstream_override.filter(|u| !u.trim().is_empty()) {
            self.catalog.upstream_url = Some(url);
        }
        if self
            .catalog
            .upstream_url
            .as_deref()
            .map_or(false, |u| u.trim().is_empty())
        {
            self.catalog.upstream_url = None;
        }
        if self.catalog.page_size == 0 {
            tracing::warn!("catalog.page_size = 0, using {}", default_page_size());
            self.catalog.page_size = default_page_size();
        }
        self
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let upstream_override = std::env::var(UPSTREAM_URL_ENV).ok();

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config.normalize(upstream_override));
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config.normalize(upstream_override))
}

pub fn initialize_config() -> anyhow::Result<&'static Config> {
    let config = load_config()?;
    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("config already initialized"))?;
    Ok(get_config())
}

pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.catalog.upstream_url, None);
        assert!(config.catalog.fallback_on_error);
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.frontend.dist_dir, "dist");
        assert!(config.server_addr().is_ok());
    }

    #[test]
    fn test_upstream_override_and_blank_url() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let config = config.normalize(Some("http://localhost:8080/content".into()));
        assert_eq!(
            config.catalog.upstream_url.as_deref(),
            Some("http://localhost:8080/content")
        );

        let toml_src = DEFAULT_CONFIG.replace(
            "[catalog]",
            "[catalog]\nupstream_url = \"  \"",
        );
        let config: Config = toml::from_str(&toml_src).unwrap();
        assert_eq!(config.normalize(None).catalog.upstream_url, None);
    }

    #[test]
    fn test_catalog_defaults_when_omitted() {
        let src = r#"
[server]
host = "127.0.0.1"
port = 8081

[catalog]

[frontend]
dist_dir = "public"
"#;
        let config: Config = toml::from_str(src).unwrap();
        assert_eq!(config.catalog.request_timeout_secs, 10);
        assert!(config.catalog.fallback_on_error);
        assert_eq!(config.server_addr().unwrap().port(), 8081);
    }
}
