//! Data fetcher: one request per call, no cache, no retry.
//!
//! When an upstream is configured its failures either surface to the
//! caller or, with `fallback_on_error`, are answered from the embedded
//! dataset.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use contracts::domain::a001_content_item::ContentItem;
use contracts::enums::{CategoryKind, Language};
use contracts::shared::catalog::dto::{RelatedContent, SearchResponse};
use contracts::shared::catalog::engine::{filter_items, SEARCH_KEY};
use contracts::shared::catalog::sort::sort_items;
use contracts::shared::catalog::ActiveFilters;
use once_cell::sync::OnceCell;

use super::error::FetchError;
use super::fallback::FallbackCatalogSource;
use super::related::build_related;
use super::source::{CatalogSource, HttpCatalogSource};
use crate::shared::config::CatalogSettings;

static FETCHER: OnceCell<DataFetcher> = OnceCell::new();

pub fn initialize(fetcher: DataFetcher) -> anyhow::Result<()> {
    FETCHER
        .set(fetcher)
        .map_err(|_| anyhow::anyhow!("data fetcher already initialized"))
}

pub fn get_fetcher() -> &'static DataFetcher {
    FETCHER
        .get()
        .expect("Data fetcher has not been initialized")
}

pub struct DataFetcher {
    primary: Option<Arc<dyn CatalogSource>>,
    fallback: Arc<dyn CatalogSource>,
    fallback_on_error: bool,
}

impl DataFetcher {
    pub fn new(
        primary: Option<Arc<dyn CatalogSource>>,
        fallback: Arc<dyn CatalogSource>,
        fallback_on_error: bool,
    ) -> Self {
        Self {
            primary,
            fallback,
            fallback_on_error,
        }
    }

    /// Fallback dataset only
    pub fn offline() -> Self {
        Self::new(None, Arc::new(FallbackCatalogSource), true)
    }

    pub fn from_settings(settings: &CatalogSettings) -> anyhow::Result<Self> {
        let primary: Option<Arc<dyn CatalogSource>> = match settings.upstream_url.as_deref() {
            Some(url) if !url.trim().is_empty() => Some(Arc::new(HttpCatalogSource::new(
                url,
                Duration::from_secs(settings.request_timeout_secs),
            )?)),
            _ => None,
        };
        Ok(Self::new(
            primary,
            Arc::new(FallbackCatalogSource),
            settings.fallback_on_error,
        ))
    }

    pub fn source_name(&self) -> &'static str {
        self.primary
            .as_ref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    /// Unfiltered items of a category/subcategory
    pub async fn fetch_category_data(
        &self,
        category: CategoryKind,
        subcategory: Option<&str>,
    ) -> Result<Vec<ContentItem>, FetchError> {
        let Some(primary) = &self.primary else {
            return self.fallback.fetch_items(category, subcategory).await;
        };

        match primary.fetch_items(category, subcategory).await {
            Ok(items) => Ok(items),
            Err(e) if self.fallback_on_error => {
                tracing::warn!(
                    category = %category,
                    subcategory = subcategory.unwrap_or("-"),
                    error = %e,
                    "upstream fetch failed, serving fallback data"
                );
                self.fallback.fetch_items(category, subcategory).await
            }
            Err(e) => {
                tracing::error!(category = %category, error = %e, "upstream fetch failed");
                Err(e)
            }
        }
    }

    /// Item by id or slug
    pub async fn fetch_item(
        &self,
        category: CategoryKind,
        key: &str,
    ) -> Result<Option<ContentItem>, FetchError> {
        let Some(primary) = &self.primary else {
            return self.fallback.fetch_item(category, key).await;
        };

        match primary.fetch_item(category, key).await {
            Ok(item) => Ok(item),
            Err(e) if self.fallback_on_error => {
                tracing::warn!(
                    category = %category,
                    key,
                    error = %e,
                    "upstream item fetch failed, serving fallback data"
                );
                self.fallback.fetch_item(category, key).await
            }
            Err(e) => {
                tracing::error!(category = %category, key, error = %e, "upstream item fetch failed");
                Err(e)
            }
        }
    }

    /// Never fails: related panels are optional, errors give an empty map
    pub async fn fetch_related_content(
        &self,
        category: CategoryKind,
        subcategory: Option<&str>,
        item_key: Option<&str>,
        lang: Language,
    ) -> RelatedContent {
        match self.fetch_category_data(category, None).await {
            Ok(items) => build_related(&items, item_key, subcategory, lang),
            Err(e) => {
                tracing::warn!(category = %category, error = %e, "related content unavailable");
                RelatedContent::new()
            }
        }
    }

    /// Top featured items of a category/subcategory
    pub async fn fetch_recommendations(
        &self,
        category: CategoryKind,
        subcategory: Option<&str>,
        lang: Language,
        limit: usize,
    ) -> Result<Vec<ContentItem>, FetchError> {
        let items = self.fetch_category_data(category, subcategory).await?;
        let mut refs: Vec<&ContentItem> = items.iter().collect();
        sort_items(&mut refs, "featured", lang);
        Ok(refs.into_iter().take(limit).cloned().collect())
    }

    /// Search predicate over every category. A category whose fetch fails
    /// is skipped.
    pub async fn search(&self, query: &str, lang: Language) -> SearchResponse {
        let query = query.trim().to_string();
        let mut results = BTreeMap::new();
        if query.is_empty() {
            return SearchResponse {
                query,
                total: 0,
                results,
            };
        }

        let mut filters = ActiveFilters::new();
        filters.set(SEARCH_KEY, query.as_str());

        for category in CategoryKind::all() {
            match self.fetch_category_data(category, None).await {
                Ok(items) => {
                    let found: Vec<ContentItem> = filter_items(&items, &filters, lang)
                        .into_iter()
                        .cloned()
                        .collect();
                    if !found.is_empty() {
                        results.insert(category.code().to_string(), found);
                    }
                }
                Err(e) => {
                    tracing::warn!(category = %category, error = %e, "search skipped category");
                }
            }
        }

        let total = results.values().map(Vec::len).sum();
        SearchResponse {
            query,
            total,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Upstream that always fails
    struct BrokenSource;

    #[async_trait]
    impl CatalogSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn fetch_items(
            &self,
            category: CategoryKind,
            _subcategory: Option<&str>,
        ) -> Result<Vec<ContentItem>, FetchError> {
            Err(FetchError::Status {
                url: format!("http://upstream/{category}"),
                status: 503,
            })
        }
    }

    fn broken(fallback_on_error: bool) -> DataFetcher {
        DataFetcher::new(
            Some(Arc::new(BrokenSource)),
            Arc::new(FallbackCatalogSource),
            fallback_on_error,
        )
    }

    #[tokio::test]
    async fn test_fallback_served_on_upstream_failure() {
        let items = broken(true)
            .fetch_category_data(CategoryKind::Cols, None)
            .await
            .unwrap();
        assert!(!items.is_empty());
    }

    #[tokio::test]
    async fn test_error_surfaces_without_fallback() {
        let result = broken(false)
            .fetch_category_data(CategoryKind::Cols, None)
            .await;
        assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_related_swallows_errors() {
        let related = broken(false)
            .fetch_related_content(CategoryKind::Cols, None, Some("col-du-tourmalet"), Language::Fr)
            .await;
        assert!(related.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_item_by_slug() {
        let fetcher = DataFetcher::offline();
        let item = fetcher
            .fetch_item(CategoryKind::Cols, "mont-ventoux")
            .await
            .unwrap();
        assert_eq!(item.map(|i| i.id), Some("mont-ventoux".to_string()));
        assert!(fetcher
            .fetch_item(CategoryKind::Cols, "col-inconnu")
            .await
            .unwrap()
            .is_none());
    }

    /// Upstream that knows a single item and nothing else
    struct SingleItemSource;

    #[async_trait]
    impl CatalogSource for SingleItemSource {
        fn name(&self) -> &'static str {
            "single"
        }

        async fn fetch_items(
            &self,
            category: CategoryKind,
            _subcategory: Option<&str>,
        ) -> Result<Vec<ContentItem>, FetchError> {
            Err(FetchError::Status {
                url: format!("http://upstream/{category}"),
                status: 500,
            })
        }

        async fn fetch_item(
            &self,
            _category: CategoryKind,
            key: &str,
        ) -> Result<Option<ContentItem>, FetchError> {
            if key == "col-secret" {
                let item = serde_json::from_value(serde_json::json!({"id": key, "name": "Col secret"}))
                    .map_err(|e| FetchError::Decode {
                        url: key.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Some(item))
            } else {
                Ok(None)
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_item_uses_item_endpoint() {
        let fetcher = DataFetcher::new(
            Some(Arc::new(SingleItemSource)),
            Arc::new(FallbackCatalogSource),
            false,
        );
        let item = fetcher
            .fetch_item(CategoryKind::Cols, "col-secret")
            .await
            .unwrap();
        assert_eq!(item.map(|i| i.id), Some("col-secret".to_string()));
        assert!(fetcher
            .fetch_item(CategoryKind::Cols, "mont-ventoux")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_fetch_item_falls_back_on_failure() {
        let item = broken(true)
            .fetch_item(CategoryKind::Cols, "mont-ventoux")
            .await
            .unwrap();
        assert!(item.is_some());
        assert!(broken(false)
            .fetch_item(CategoryKind::Cols, "mont-ventoux")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_search_across_categories() {
        let fetcher = DataFetcher::offline();
        let response = fetcher.search("Tourmalet", Language::Fr).await;
        assert_eq!(response.results["cols"].len(), 1);
        // the 7 majors challenge lists the Tourmalet only by id, not in its text
        assert!(!response.results.contains_key("challenges"));

        let response = fetcher.search("pyrénées", Language::Fr).await;
        assert!(response.total >= 2);

        let empty = fetcher.search("   ", Language::Fr).await;
        assert_eq!(empty.total, 0);
    }

    #[tokio::test]
    async fn test_recommendations_are_featured_first() {
        let fetcher = DataFetcher::offline();
        let recs = fetcher
            .fetch_recommendations(CategoryKind::Cols, Some("alpes"), Language::Fr, 2)
            .await
            .unwrap();
        let ids: Vec<&str> = recs.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["col-du-galibier", "alpe-d-huez"]);
    }
}
