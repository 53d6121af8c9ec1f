//! `<title>` and `<link rel="canonical|prev|next">` of the current page.

use contracts::shared::catalog::pagination::PaginationLinks;
use web_sys::window;

const MANAGED_RELS: [&str; 3] = ["canonical", "prev", "next"];

fn origin() -> String {
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn set_title(title: &str) {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

/// Replaces the managed `<link>` tags; `None` just removes them
pub fn set_pagination_links(links: Option<&PaginationLinks>) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    let Some(head) = document.head() else {
        return;
    };

    for rel in MANAGED_RELS {
        if let Ok(Some(existing)) = document.query_selector(&format!("link[rel='{rel}']")) {
            existing.remove();
        }
    }

    let Some(links) = links else {
        return;
    };
    let origin = origin();
    let wanted = [
        ("canonical", Some(&links.canonical)),
        ("prev", links.prev.as_ref()),
        ("next", links.next.as_ref()),
    ];
    for (rel, href) in wanted {
        let Some(href) = href else { continue };
        let Ok(link) = document.create_element("link") else {
            continue;
        };
        let _ = link.set_attribute("rel", rel);
        let _ = link.set_attribute("href", &format!("{origin}{href}"));
        if let Err(e) = head.append_child(&link) {
            log::warn!("failed to add <link rel={}>: {:?}", rel, e);
        }
    }
}

/// "Cols des Alpes - page 3 | Velo-Altitude"
pub fn page_title(label: &str, page: usize) -> String {
    if page > 1 {
        format!("{label} - page {page} | Velo-Altitude")
    } else {
        format!("{label} | Velo-Altitude")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_title() {
        assert_eq!(page_title("Cols", 1), "Cols | Velo-Altitude");
        assert_eq!(page_title("Cols", 3), "Cols - page 3 | Velo-Altitude");
    }
}
