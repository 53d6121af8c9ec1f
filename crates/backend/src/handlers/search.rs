use axum::extract::Query;
use axum::Json;
use contracts::enums::Language;
use contracts::shared::catalog::dto::{SearchQuery, SearchResponse};

use crate::catalog::fetcher;

/// GET /api/search?q=&lang=
pub async fn search(Query(query): Query<SearchQuery>) -> Json<SearchResponse> {
    let lang = query
        .lang
        .as_deref()
        .map(Language::from_code)
        .unwrap_or_default();
    let response = fetcher::get_fetcher().search(&query.q, lang).await;
    tracing::debug!("search '{}': {} results", response.query, response.total);
    Json(response)
}
