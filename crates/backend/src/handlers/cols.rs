use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_content_item::ContentItem;

use crate::catalog::fetcher;
use crate::cols::service::{self, ColsQuery, NearbyCol, NearbyQuery, PopularQuery};

/// GET /api/passes/cols?region=&difficulty=&sort=
pub async fn list(Query(query): Query<ColsQuery>) -> Result<Json<Vec<ContentItem>>, StatusCode> {
    match service::list(fetcher::get_fetcher(), &query).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list cols: {}", e);
            Err(e.status_code())
        }
    }
}

/// GET /api/passes/cols/popular?limit=
pub async fn popular(
    Query(query): Query<PopularQuery>,
) -> Result<Json<Vec<ContentItem>>, StatusCode> {
    let limit = query.limit.unwrap_or(service::DEFAULT_POPULAR_LIMIT);
    match service::popular(fetcher::get_fetcher(), limit).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to fetch popular cols: {}", e);
            Err(e.status_code())
        }
    }
}

/// GET /api/passes/cols/nearby?lat=&lng=&radius_km=
pub async fn nearby(Query(query): Query<NearbyQuery>) -> Result<Json<Vec<NearbyCol>>, StatusCode> {
    if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lng) {
        return Err(StatusCode::BAD_REQUEST);
    }
    if query.radius_km.map_or(false, |r| r.is_nan() || r <= 0.0) {
        return Err(StatusCode::BAD_REQUEST);
    }
    match service::nearby(fetcher::get_fetcher(), &query).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to fetch nearby cols: {}", e);
            Err(e.status_code())
        }
    }
}

/// GET /api/passes/cols/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<ContentItem>, StatusCode> {
    match service::get_by_id(fetcher::get_fetcher(), &id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to fetch col {}: {}", id, e);
            Err(e.status_code())
        }
    }
}
