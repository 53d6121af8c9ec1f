use thiserror::Error;

/// Failures of the data fetcher
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("invalid payload from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// Status code a handler answers with
    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            // upstream answered 404 for the whole category/subcategory
            FetchError::Status { status: 404, .. } => axum::http::StatusCode::NOT_FOUND,
            FetchError::Http { .. } | FetchError::Status { .. } | FetchError::Decode { .. } => {
                axum::http::StatusCode::BAD_GATEWAY
            }
        }
    }
}
