use contracts::enums::{CategoryKind, Language};
use contracts::shared::catalog::dto::CategoryPageResponse;
use contracts::shared::catalog::engine::run_view;
use contracts::shared::catalog::pagination::pagination_links;
use contracts::shared::catalog::registry::config_for;
use contracts::shared::catalog::url_sync;

use super::error::FetchError;
use super::fetcher::DataFetcher;

/// Public path of a category page, used in canonical/prev/next links
pub fn base_path(category: CategoryKind, subcategory: Option<&str>) -> String {
    match subcategory {
        Some(sub) => format!("/{}/{}", category.code(), sub),
        None => format!("/{}", category.code()),
    }
}

/// Runs the whole pipeline server-side: URL query -> view state -> items
/// -> engine -> page with SEO links.
pub async fn category_page(
    fetcher: &DataFetcher,
    category: CategoryKind,
    subcategory: Option<&str>,
    raw_query: &str,
    lang: Language,
    page_size: usize,
) -> Result<CategoryPageResponse, FetchError> {
    let config = config_for(category);
    let mut state = url_sync::deserialize(raw_query, Some(config));

    let items = fetcher.fetch_category_data(category, subcategory).await?;
    let page = run_view(&items, &state, page_size, lang);
    state.page = page.page;

    let links = pagination_links(
        &base_path(category, subcategory),
        &state,
        config.default_sort,
        page.total_pages,
    );

    tracing::debug!(
        category = %category,
        filtered = page.filtered_count,
        total = page.total_count,
        page = page.page,
        "category page built"
    );

    Ok(CategoryPageResponse {
        category: category.code().to_string(),
        subcategory: subcategory.map(str::to_string),
        items: page.items,
        page: page.page,
        total_pages: page.total_pages,
        filtered_count: page.filtered_count,
        total_count: page.total_count,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_page_out_of_range_is_clamped() {
        let fetcher = DataFetcher::offline();
        let page = category_page(&fetcher, CategoryKind::Cols, None, "page=9", Language::Fr, 4)
            .await
            .unwrap();
        // 10 cols, 4 per page
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.links.canonical, "/cols?page=3");
        assert_eq!(page.links.prev.as_deref(), Some("/cols?page=2"));
        assert_eq!(page.links.next, None);
    }

    #[tokio::test]
    async fn test_filters_and_sort_from_query() {
        let fetcher = DataFetcher::offline();
        let page = category_page(
            &fetcher,
            CategoryKind::Cols,
            Some("alpes"),
            "?altitude_min=2000&sort=altitude_asc&lang=en",
            Language::En,
            12,
        )
        .await
        .unwrap();

        let ids: Vec<&str> = page.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["col-de-la-madeleine", "col-d-izoard", "col-du-galibier"]);
        assert_eq!(page.page, 1);
        assert_eq!(
            page.links.canonical,
            "/cols/alpes?altitude_min=2000&sort=altitude_asc"
        );
    }
}
