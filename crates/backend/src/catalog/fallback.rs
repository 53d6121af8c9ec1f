//! Embedded demo dataset, used offline or when the upstream fails.

use std::collections::BTreeMap;

use async_trait::async_trait;
use contracts::domain::a001_content_item::ContentItem;
use contracts::enums::CategoryKind;
use once_cell::sync::Lazy;

use super::error::FetchError;
use super::source::CatalogSource;

const FALLBACK_JSON: &str = include_str!("fallback_data.json");

static FALLBACK_DATA: Lazy<BTreeMap<String, Vec<ContentItem>>> = Lazy::new(|| {
    serde_json::from_str(FALLBACK_JSON).unwrap_or_else(|e| {
        tracing::error!("Embedded fallback dataset is invalid: {}", e);
        BTreeMap::new()
    })
});

/// Demo items of a category; a subcategory narrows by the item's `subcategory`
pub fn get_fallback_data(category: CategoryKind, subcategory: Option<&str>) -> Vec<ContentItem> {
    let items = FALLBACK_DATA
        .get(category.code())
        .cloned()
        .unwrap_or_default();

    match subcategory {
        Some(sub) => items
            .into_iter()
            .filter(|item| item.subcategory.as_deref() == Some(sub))
            .collect(),
        None => items,
    }
}

pub struct FallbackCatalogSource;

#[async_trait]
impl CatalogSource for FallbackCatalogSource {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn fetch_items(
        &self,
        category: CategoryKind,
        subcategory: Option<&str>,
    ) -> Result<Vec<ContentItem>, FetchError> {
        Ok(get_fallback_data(category, subcategory))
    }
}
