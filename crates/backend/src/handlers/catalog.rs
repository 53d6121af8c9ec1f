use axum::extract::{Path, Query, RawQuery};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_content_item::ContentItem;
use contracts::enums::{CategoryKind, Language};
use contracts::shared::catalog::dto::{
    CategoryConfigDto, CategoryPageResponse, RelatedContent, RelatedContentQuery,
};
use contracts::shared::catalog::registry::{all_categories, config_for};
use serde::{Deserialize, Serialize};

use crate::catalog::{fetcher, service};
use crate::shared::config::get_config;

pub const RECOMMENDATIONS_LIMIT: usize = 6;

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    pub fn language(&self) -> Language {
        self.lang.as_deref().map(Language::from_code).unwrap_or_default()
    }
}

/// `/api/content/:category/:segment` answers a list or a single item
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ContentSegment {
    Items(Vec<ContentItem>),
    Item(Box<ContentItem>),
}

fn parse_category(category: &str) -> Result<CategoryKind, StatusCode> {
    CategoryKind::from_code(category).ok_or_else(|| {
        tracing::debug!("unknown category '{}'", category);
        StatusCode::NOT_FOUND
    })
}

/// GET /api/categories
pub async fn list_categories() -> Json<Vec<CategoryConfigDto>> {
    Json(all_categories().into_iter().map(Into::into).collect())
}

/// GET /api/categories/:category
pub async fn get_category(
    Path(category): Path<String>,
) -> Result<Json<CategoryConfigDto>, StatusCode> {
    let kind = parse_category(&category)?;
    Ok(Json(config_for(kind).into()))
}

/// GET /api/content/:category
pub async fn get_content(
    Path(category): Path<String>,
) -> Result<Json<Vec<ContentItem>>, StatusCode> {
    let kind = parse_category(&category)?;
    match fetcher::get_fetcher().fetch_category_data(kind, None).await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            tracing::error!("Failed to fetch {}: {}", kind, e);
            Err(e.status_code())
        }
    }
}

/// GET /api/content/:category/:segment
///
/// `segment` is a subcategory key of the category, otherwise an item id or slug.
pub async fn get_content_segment(
    Path((category, segment)): Path<(String, String)>,
) -> Result<Json<ContentSegment>, StatusCode> {
    let kind = parse_category(&category)?;
    let fetcher = fetcher::get_fetcher();

    if config_for(kind).subcategory(&segment).is_some() {
        return match fetcher.fetch_category_data(kind, Some(&segment)).await {
            Ok(items) => Ok(Json(ContentSegment::Items(items))),
            Err(e) => {
                tracing::error!("Failed to fetch {}/{}: {}", kind, segment, e);
                Err(e.status_code())
            }
        };
    }

    match fetcher.fetch_item(kind, &segment).await {
        Ok(Some(item)) => Ok(Json(ContentSegment::Item(Box::new(item)))),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to fetch {} item {}: {}", kind, segment, e);
            Err(e.status_code())
        }
    }
}

async fn catalog_page(
    category: String,
    subcategory: Option<String>,
    lang: Language,
    query: Option<String>,
) -> Result<Json<CategoryPageResponse>, StatusCode> {
    let kind = parse_category(&category)?;
    if let Some(sub) = subcategory.as_deref() {
        if config_for(kind).subcategory(sub).is_none() {
            return Err(StatusCode::NOT_FOUND);
        }
    }

    let page_size = get_config().catalog.page_size;
    match service::category_page(
        fetcher::get_fetcher(),
        kind,
        subcategory.as_deref(),
        query.as_deref().unwrap_or_default(),
        lang,
        page_size,
    )
    .await
    {
        Ok(page) => Ok(Json(page)),
        Err(e) => {
            tracing::error!("Failed to build {} page: {}", kind, e);
            Err(e.status_code())
        }
    }
}

/// GET /api/catalog/:category?page=&sort=&{filter}=
pub async fn get_catalog_page(
    Path(category): Path<String>,
    Query(lang): Query<LangQuery>,
    RawQuery(query): RawQuery,
) -> Result<Json<CategoryPageResponse>, StatusCode> {
    catalog_page(category, None, lang.language(), query).await
}

/// GET /api/catalog/:category/:subcategory?page=&sort=&{filter}=
pub async fn get_catalog_subcategory_page(
    Path((category, subcategory)): Path<(String, String)>,
    Query(lang): Query<LangQuery>,
    RawQuery(query): RawQuery,
) -> Result<Json<CategoryPageResponse>, StatusCode> {
    catalog_page(category, Some(subcategory), lang.language(), query).await
}

/// GET /api/related/:category/:item_id?lang=&subcategory=
pub async fn get_related(
    Path((category, item_id)): Path<(String, String)>,
    Query(query): Query<RelatedContentQuery>,
) -> Result<Json<RelatedContent>, StatusCode> {
    let kind = parse_category(&category)?;
    let lang = query
        .lang
        .as_deref()
        .map(Language::from_code)
        .unwrap_or_default();
    let related = fetcher::get_fetcher()
        .fetch_related_content(kind, query.subcategory.as_deref(), Some(&item_id), lang)
        .await;
    Ok(Json(related))
}

async fn recommendations(
    category: String,
    subcategory: Option<String>,
    lang: Language,
) -> Result<Json<Vec<ContentItem>>, StatusCode> {
    let kind = parse_category(&category)?;
    match fetcher::get_fetcher()
        .fetch_recommendations(kind, subcategory.as_deref(), lang, RECOMMENDATIONS_LIMIT)
        .await
    {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            tracing::error!("Failed to fetch {} recommendations: {}", kind, e);
            Err(e.status_code())
        }
    }
}

/// GET /api/recommendations/:category?lang=
pub async fn get_recommendations(
    Path(category): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Vec<ContentItem>>, StatusCode> {
    recommendations(category, None, query.language()).await
}

/// GET /api/recommendations/:category/:subcategory?lang=
pub async fn get_subcategory_recommendations(
    Path((category, subcategory)): Path<(String, String)>,
    Query(query): Query<LangQuery>,
) -> Result<Json<Vec<ContentItem>>, StatusCode> {
    recommendations(category, Some(subcategory), query.language()).await
}
