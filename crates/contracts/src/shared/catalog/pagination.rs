//! SEO pagination: canonical / prev / next URLs and the pager window.

use serde::{Deserialize, Serialize};

use super::url_sync::to_url;
use super::view_state::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
    pub canonical: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Entry of the pager: a page number or an ellipsis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageItem {
    Page(usize),
    Gap,
}

/// Links for `<link rel="canonical|prev|next">`. The page in `state` is
/// expected to be already clamped.
pub fn pagination_links(
    base_path: &str,
    state: &ViewState,
    default_sort: &str,
    total_pages: usize,
) -> PaginationLinks {
    let at_page = |page: usize| {
        let mut s = state.clone();
        s.page = page;
        to_url(base_path, &s, default_sort)
    };

    PaginationLinks {
        canonical: to_url(base_path, state, default_sort),
        prev: (state.page > 1).then(|| at_page(state.page - 1)),
        next: (state.page < total_pages).then(|| at_page(state.page + 1)),
    }
}

/// First, last and `current ± radius`, with gaps in between
pub fn page_window(current: usize, total_pages: usize, radius: usize) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let from = current.saturating_sub(radius).max(1);
    let to = (current + radius).min(total_pages);

    let mut items = Vec::new();
    if from > 1 {
        items.push(PageItem::Page(1));
        if from > 2 {
            items.push(PageItem::Gap);
        }
    }
    items.extend((from..=to).map(PageItem::Page));
    if to < total_pages {
        if to < total_pages - 1 {
            items.push(PageItem::Gap);
        }
        items.push(PageItem::Page(total_pages));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Gap, Page};

    #[test]
    fn test_links_first_page() {
        let state = ViewState::default();
        let links = pagination_links("/cols", &state, "featured", 3);
        assert_eq!(links.canonical, "/cols");
        assert_eq!(links.prev, None);
        assert_eq!(links.next.as_deref(), Some("/cols?page=2"));
    }

    #[test]
    fn test_links_prev_to_first_page_omits_page_param() {
        let mut state = ViewState::default();
        state.set_filter("difficulty", "4");
        state.set_sort("altitude");
        state.set_page(2);
        let links = pagination_links("/cols/alpes", &state, "featured", 2);
        assert_eq!(links.canonical, "/cols/alpes?difficulty=4&page=2&sort=altitude");
        assert_eq!(links.prev.as_deref(), Some("/cols/alpes?difficulty=4&sort=altitude"));
        assert_eq!(links.next, None);
    }

    #[test]
    fn test_window() {
        assert_eq!(page_window(1, 0, 2), vec![]);
        assert_eq!(page_window(1, 3, 2), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(
            page_window(6, 12, 2),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Page(7), Page(8), Gap, Page(12)]
        );
        assert_eq!(
            page_window(2, 6, 1),
            vec![Page(1), Page(2), Page(3), Gap, Page(6)]
        );
        assert_eq!(
            page_window(5, 6, 1),
            vec![Page(1), Gap, Page(4), Page(5), Page(6)]
        );
    }
}
