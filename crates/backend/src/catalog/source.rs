use std::time::Duration;

use async_trait::async_trait;
use contracts::domain::a001_content_item::ContentItem;
use contracts::enums::CategoryKind;

use super::error::FetchError;

/// Where category item lists come from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Unfiltered list of a category, optionally narrowed to a subcategory
    async fn fetch_items(
        &self,
        category: CategoryKind,
        subcategory: Option<&str>,
    ) -> Result<Vec<ContentItem>, FetchError>;

    /// One item by id or slug; `None` when the source does not know it
    async fn fetch_item(
        &self,
        category: CategoryKind,
        key: &str,
    ) -> Result<Option<ContentItem>, FetchError> {
        let items = self.fetch_items(category, None).await?;
        Ok(items.into_iter().find(|i| i.id == key || i.slug == key))
    }
}

/// HTTP client of the remote catalog: `GET {base}/{category}[/{subcategory}]`
/// for lists, `GET {base}/{category}/{id}` for a single item
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogSource {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn category_url(&self, category: CategoryKind, subcategory: Option<&str>) -> String {
        match subcategory {
            Some(sub) => format!(
                "{}/{}/{}",
                self.base_url,
                category.code(),
                urlencoding::encode(sub)
            ),
            None => format!("{}/{}", self.base_url, category.code()),
        }
    }

    pub fn item_url(&self, category: CategoryKind, key: &str) -> String {
        format!("{}/{}/{}", self.base_url, category.code(), urlencoding::encode(key))
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// The upstream answers either a bare array or an envelope
/// `{"data": [...]}` / `{"items": [...]}`
pub fn decode_items(url: &str, body: serde_json::Value) -> Result<Vec<ContentItem>, FetchError> {
    let list = match body {
        serde_json::Value::Array(_) => body,
        serde_json::Value::Object(mut map) => map
            .remove("data")
            .or_else(|| map.remove("items"))
            .ok_or_else(|| FetchError::Decode {
                url: url.to_string(),
                message: "expected an array or a data/items envelope".to_string(),
            })?,
        other => {
            return Err(FetchError::Decode {
                url: url.to_string(),
                message: format!("unexpected JSON value: {other}"),
            })
        }
    };

    let serde_json::Value::Array(values) = list else {
        return Err(FetchError::Decode {
            url: url.to_string(),
            message: "item list is not an array".to_string(),
        });
    };

    let items = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(url = %url, index, error = %e, "skipping malformed item");
                None
            }
        })
        .collect();
    Ok(items)
}

/// A single item, bare or wrapped in `{"data": {...}}`
pub fn decode_item(url: &str, body: serde_json::Value) -> Result<ContentItem, FetchError> {
    let value = match body {
        serde_json::Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(value).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn name(&self) -> &'static str {
        "upstream"
    }

    async fn fetch_items(
        &self,
        category: CategoryKind,
        subcategory: Option<&str>,
    ) -> Result<Vec<ContentItem>, FetchError> {
        let url = self.category_url(category, subcategory);
        tracing::debug!(url = %url, "fetching category data");
        let body = self.get_json(&url).await?;
        decode_items(&url, body)
    }

    async fn fetch_item(
        &self,
        category: CategoryKind,
        key: &str,
    ) -> Result<Option<ContentItem>, FetchError> {
        let url = self.item_url(category, key);
        tracing::debug!(url = %url, "fetching item");
        match self.get_json(&url).await {
            Ok(body) => decode_item(&url, body).map(Some),
            Err(FetchError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
