use axum::{routing::get, Router};

use crate::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // CATEGORY REGISTRY
        // ========================================
        .route("/api/categories", get(handlers::catalog::list_categories))
        .route(
            "/api/categories/:category",
            get(handlers::catalog::get_category),
        )
        // ========================================
        // CONTENT (raw lists / items)
        // ========================================
        .route("/api/content/:category", get(handlers::catalog::get_content))
        .route(
            "/api/content/:category/:segment",
            get(handlers::catalog::get_content_segment),
        )
        // Server-side filter/sort/paginate
        .route(
            "/api/catalog/:category",
            get(handlers::catalog::get_catalog_page),
        )
        .route(
            "/api/catalog/:category/:subcategory",
            get(handlers::catalog::get_catalog_subcategory_page),
        )
        .route(
            "/api/related/:category/:item_id",
            get(handlers::catalog::get_related),
        )
        .route(
            "/api/recommendations/:category",
            get(handlers::catalog::get_recommendations),
        )
        .route(
            "/api/recommendations/:category/:subcategory",
            get(handlers::catalog::get_subcategory_recommendations),
        )
        .route("/api/search", get(handlers::search::search))
        // ========================================
        // COLS
        // ========================================
        .route("/api/passes/cols", get(handlers::cols::list))
        .route("/api/passes/cols/popular", get(handlers::cols::popular))
        .route("/api/passes/cols/nearby", get(handlers::cols::nearby))
        .route("/api/passes/cols/:id", get(handlers::cols::get_by_id))
}
