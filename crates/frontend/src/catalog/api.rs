//! Client-side data fetcher. Every call is one request: no retry, no cache.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use contracts::domain::a001_content_item::ContentItem;
use contracts::enums::Language;
use contracts::shared::catalog::dto::RelatedContent;

use crate::shared::api_utils::get_json;

/// Scopes async fetches to their consumer. `begin()` hands out a ticket;
/// a response is applied only if its ticket is still the latest one and
/// the owner has not been disposed.
#[derive(Clone, Default)]
pub struct FetchToken {
    generation: Arc<AtomicU64>,
    cancelled: Arc<AtomicBool>,
}

impl FetchToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        !self.cancelled.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Called from `on_cleanup`: every pending response is dropped
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

fn content_path(category: &str, segment: Option<&str>) -> String {
    match segment {
        Some(seg) => format!(
            "/api/content/{}/{}",
            urlencoding::encode(category),
            urlencoding::encode(seg)
        ),
        None => format!("/api/content/{}", urlencoding::encode(category)),
    }
}

/// Unfiltered items of a category (and subcategory)
pub async fn fetch_category_data(
    category: &str,
    subcategory: Option<&str>,
) -> Result<Vec<ContentItem>, String> {
    get_json(&content_path(category, subcategory)).await
}

pub async fn fetch_item(category: &str, key: &str) -> Result<ContentItem, String> {
    get_json(&content_path(category, Some(key))).await
}

/// Never fails: an error is logged and gives an empty map
pub async fn fetch_related_content(
    category: &str,
    subcategory: Option<&str>,
    item_id: &str,
    lang: Language,
) -> RelatedContent {
    let mut path = format!(
        "/api/related/{}/{}?lang={}",
        urlencoding::encode(category),
        urlencoding::encode(item_id),
        lang.code()
    );
    if let Some(sub) = subcategory {
        path.push_str("&subcategory=");
        path.push_str(&urlencoding::encode(sub));
    }

    match get_json::<RelatedContent>(&path).await {
        Ok(related) => related,
        Err(e) => {
            log::warn!("related content for {}/{} unavailable: {}", category, item_id, e);
            RelatedContent::new()
        }
    }
}
