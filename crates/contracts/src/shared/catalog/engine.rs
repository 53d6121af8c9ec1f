//! Filter / sort / paginate engine
//!
//! Pure function of (items, active filters, sort key, page). Callers may
//! memoize on their inputs; nothing here keeps state between calls.

use serde::{Deserialize, Serialize};

use super::filter::{ActiveFilters, FilterValue, MAX_SUFFIX, MIN_SUFFIX};
use super::sort::sort_items;
use super::view_state::ViewState;
use crate::domain::a001_content_item::{ContentItem, FieldValue};
use crate::enums::Language;

pub const PAGE_SIZE: usize = 12;
pub const SEARCH_KEY: &str = "search";

/// One page of the derived list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    /// Effective page (1-based) after clamping
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
}

// ============================================================================
// Filter pass
// ============================================================================

fn same_scalar(field: FieldValue<'_>, value: &FilterValue) -> bool {
    match (field, value) {
        (FieldValue::Text(t), FilterValue::Text(v)) => t == v,
        (FieldValue::Text(t), FilterValue::Number(v)) => t.trim().parse::<f64>().ok() == Some(*v),
        (FieldValue::Number(n), v) => v.as_number() == Some(n),
        (FieldValue::Bool(b), FilterValue::Text(v)) => v.parse::<bool>().ok() == Some(b),
        _ => false,
    }
}

/// Predicate of a single active filter entry
pub fn matches_filter(item: &ContentItem, key: &str, value: &FilterValue, lang: Language) -> bool {
    if let FilterValue::List(selected) = value {
        return match item.field(key) {
            Some(FieldValue::List(values)) => selected.iter().any(|s| values.contains(s)),
            _ => false,
        };
    }

    if let Some(field) = key.strip_suffix(MIN_SUFFIX) {
        return match (item.number(field), value.as_number()) {
            (Some(n), Some(bound)) => n >= bound,
            _ => false,
        };
    }

    if let Some(field) = key.strip_suffix(MAX_SUFFIX) {
        return match (item.number(field), value.as_number()) {
            (Some(n), Some(bound)) => n <= bound,
            _ => false,
        };
    }

    if key == SEARCH_KEY {
        let needle = value.to_query_value().trim().to_lowercase();
        return item.search_text(lang).contains(&needle);
    }

    match item.field(key) {
        Some(field) => same_scalar(field, value),
        None => false,
    }
}

/// Logical AND of every active filter; no filters means no constraint
pub fn matches_filters(item: &ContentItem, filters: &ActiveFilters, lang: Language) -> bool {
    filters
        .iter()
        .all(|(key, value)| matches_filter(item, key, value, lang))
}

pub fn filter_items<'a>(
    items: &'a [ContentItem],
    filters: &ActiveFilters,
    lang: Language,
) -> Vec<&'a ContentItem> {
    items
        .iter()
        .filter(|item| matches_filters(item, filters, lang))
        .collect()
}

// ============================================================================
// Paginate pass
// ============================================================================

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Requested page brought into `1..=max(total_pages, 1)`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, usize) {
    let page_size = page_size.max(1);
    let page = clamp_page(page, total_pages(items.len(), page_size));
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    let slice = items.get(start..end).unwrap_or(&[]);
    (slice.to_vec(), page)
}

// ============================================================================
// Pipeline
// ============================================================================

/// Filter, then sort, then paginate
pub fn run_pipeline(
    items: &[ContentItem],
    filters: &ActiveFilters,
    sort_key: &str,
    page: usize,
    page_size: usize,
    lang: Language,
) -> PageResult<ContentItem> {
    let mut filtered = filter_items(items, filters, lang);
    sort_items(&mut filtered, sort_key, lang);

    let filtered_count = filtered.len();
    let pages = total_pages(filtered_count, page_size);
    let (visible, page) = paginate(&filtered, page, page_size);

    PageResult {
        items: visible.into_iter().cloned().collect(),
        page,
        total_pages: pages,
        filtered_count,
        total_count: items.len(),
    }
}

pub fn run_view(
    items: &[ContentItem],
    state: &ViewState,
    page_size: usize,
    lang: Language,
) -> PageResult<ContentItem> {
    run_pipeline(items, &state.filters, &state.sort, state.page, page_size, lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use serde_json::json;

    fn col(id: usize, difficulty: u8, altitude: u32) -> ContentItem {
        serde_json::from_value(json!({
            "id": format!("col-{id}"),
            "name": {"fr": format!("Col {id}"), "en": format!("Pass {id}")},
            "difficulty": difficulty,
            "altitude": altitude,
            "featured": 100 - id as i64,
        }))
        .unwrap()
    }

    fn filters(map: std::collections::BTreeMap<&str, FilterValue>) -> ActiveFilters {
        map.into_iter().collect()
    }

    #[test]
    fn test_twenty_five_cols_three_pages() {
        let items: Vec<ContentItem> = (0..25).map(|i| col(i, 3, 1500)).collect();
        let none = ActiveFilters::new();

        let first = run_pipeline(&items, &none, "featured", 1, PAGE_SIZE, Language::Fr);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items, items[0..12].to_vec());

        let last = run_pipeline(&items, &none, "featured", 3, PAGE_SIZE, Language::Fr);
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0], items[24]);
        assert_eq!(last.page, 3);
    }

    #[test]
    fn test_select_difficulty() {
        let mut items: Vec<ContentItem> = (0..10).map(|i| col(i, 3, 1500)).collect();
        items.extend((10..13).map(|i| col(i, 5, 2000)));

        let active = filters(btreemap! { "difficulty" => FilterValue::from("5") });
        let result = run_pipeline(&items, &active, "featured", 1, PAGE_SIZE, Language::Fr);
        assert_eq!(result.items.len(), 3);
        assert!(result.items.iter().all(|i| i.number("difficulty") == Some(5.0)));
    }

    #[test]
    fn test_altitude_min() {
        let items: Vec<ContentItem> = [1200, 1860, 2115, 2758]
            .iter()
            .enumerate()
            .map(|(i, alt)| col(i, 3, *alt))
            .collect();
        let active = filters(btreemap! { "altitude_min" => FilterValue::Number(2000.0) });
        let result = run_pipeline(&items, &active, "unknown", 1, PAGE_SIZE, Language::Fr);
        let altitudes: Vec<f64> = result
            .items
            .iter()
            .filter_map(|i| i.number("altitude"))
            .collect();
        assert_eq!(altitudes, vec![2115.0, 2758.0]);
    }

    #[test]
    fn test_altitude_max_and_missing_field() {
        let mut items: Vec<ContentItem> = vec![col(0, 2, 1200), col(1, 4, 2642)];
        items.push(serde_json::from_value(json!({"id": "x", "name": "Sans altitude"})).unwrap());
        let active = filters(btreemap! { "altitude_max" => FilterValue::from("2000") });
        let result = filter_items(&items, &active, Language::Fr);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "col-0");
    }

    #[test]
    fn test_search_localized_name_case_insensitive() {
        let items: Vec<ContentItem> = vec![
            serde_json::from_value(json!({
                "id": "tourmalet",
                "name": {"fr": "Col du Tourmalet", "en": "Col du Tourmalet"},
            }))
            .unwrap(),
            col(1, 3, 1500),
        ];
        let active = filters(btreemap! { "search" => FilterValue::from("tourmalet") });
        for lang in [Language::Fr, Language::En] {
            let result = filter_items(&items, &active, lang);
            assert_eq!(result.len(), 1);
            assert_eq!(result[0].id, "tourmalet");
        }
    }

    #[test]
    fn test_search_matches_tags() {
        let items: Vec<ContentItem> = vec![serde_json::from_value(json!({
            "id": "ventoux",
            "name": "Mont Ventoux",
            "tags": ["Géant de Provence"],
        }))
        .unwrap()];
        let active = filters(btreemap! { "search" => FilterValue::from("PROVENCE") });
        assert_eq!(filter_items(&items, &active, Language::Fr).len(), 1);
    }

    #[test]
    fn test_multi_select_intersection() {
        let items: Vec<ContentItem> = vec![
            serde_json::from_value(json!({"id": "a", "name": "A", "features": ["panorama"]})).unwrap(),
            serde_json::from_value(json!({"id": "b", "name": "B", "features": ["hairpins", "historic"]})).unwrap(),
            serde_json::from_value(json!({"id": "c", "name": "C", "features": "historic"})).unwrap(),
            serde_json::from_value(json!({"id": "d", "name": "D"})).unwrap(),
        ];
        let active = filters(btreemap! {
            "features" => FilterValue::List(vec!["historic".into(), "gravel".into()]),
        });
        let result = filter_items(&items, &active, Language::Fr);
        assert_eq!(result.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_all_filters_must_pass() {
        let items: Vec<ContentItem> = vec![col(0, 5, 1800), col(1, 5, 2400), col(2, 2, 2400)];
        let active = filters(btreemap! {
            "difficulty" => FilterValue::from("5"),
            "altitude_min" => FilterValue::Number(2000.0),
        });
        let result = filter_items(&items, &active, Language::Fr);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "col-1");
    }

    #[test]
    fn test_visible_items_satisfy_filters() {
        let items: Vec<ContentItem> = (0..40)
            .map(|i| col(i, (i % 5 + 1) as u8, 1000 + (i as u32) * 50))
            .collect();
        let cases = vec![
            filters(btreemap! { "difficulty" => FilterValue::from("2") }),
            filters(btreemap! { "altitude_min" => FilterValue::Number(1800.0) }),
            filters(btreemap! {
                "altitude_max" => FilterValue::Number(2500.0),
                "difficulty" => FilterValue::from("4"),
            }),
            ActiveFilters::new(),
        ];
        for active in cases {
            for page in 1..=4 {
                let result = run_pipeline(&items, &active, "altitude", page, PAGE_SIZE, Language::Fr);
                assert!(result.filtered_count <= result.total_count);
                assert!(result
                    .items
                    .iter()
                    .all(|item| matches_filters(item, &active, Language::Fr)));
            }
        }
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let items: Vec<ContentItem> = (0..30).map(|i| col(i, 3, 1500)).collect();
        let result = run_pipeline(&items, &ActiveFilters::new(), "featured", 9, PAGE_SIZE, Language::Fr);
        assert_eq!(result.page, 3);
        assert_eq!(result.items.len(), 6);

        let result = run_pipeline(&items, &ActiveFilters::new(), "featured", 0, PAGE_SIZE, Language::Fr);
        assert_eq!(result.page, 1);
    }

    #[test]
    fn test_empty_result() {
        let items: Vec<ContentItem> = (0..5).map(|i| col(i, 3, 1500)).collect();
        let active = filters(btreemap! { "difficulty" => FilterValue::from("1") });
        let result = run_pipeline(&items, &active, "featured", 2, PAGE_SIZE, Language::Fr);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.page, 1);
        assert!(result.items.is_empty());
    }
}
