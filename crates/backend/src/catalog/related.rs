use contracts::domain::a001_content_item::ContentItem;
use contracts::enums::Language;
use contracts::shared::catalog::dto::RelatedContent;
use contracts::shared::catalog::sort::sort_items;

pub const RELATED_LIMIT: usize = 4;

fn top_featured<'a>(
    mut items: Vec<&'a ContentItem>,
    limit: usize,
    lang: Language,
) -> Vec<ContentItem> {
    sort_items(&mut items, "featured", lang);
    items.into_iter().take(limit).cloned().collect()
}

/// Groups of items related to `item_key` (id or slug). An unknown item
/// gives an empty map; no item gives only the popular group.
pub fn build_related(
    items: &[ContentItem],
    item_key: Option<&str>,
    subcategory: Option<&str>,
    lang: Language,
) -> RelatedContent {
    let mut related = RelatedContent::new();

    let current = match item_key {
        Some(key) => match items.iter().find(|i| i.id == key || i.slug == key) {
            Some(item) => Some(item),
            None => return related,
        },
        None => None,
    };
    let current_id = current.map(|c| c.id.as_str());
    let others = || items.iter().filter(move |i| Some(i.id.as_str()) != current_id);

    if let Some(region) = current.and_then(|c| c.region.as_deref()) {
        let same_region: Vec<&ContentItem> = others()
            .filter(|i| i.region.as_deref() == Some(region))
            .collect();
        related.insert(
            "same_region".to_string(),
            top_featured(same_region, RELATED_LIMIT, lang),
        );
    }

    let sub = subcategory.or_else(|| current.and_then(|c| c.subcategory.as_deref()));
    if let Some(sub) = sub {
        let same_sub: Vec<&ContentItem> = others()
            .filter(|i| i.subcategory.as_deref() == Some(sub))
            .collect();
        related.insert(
            "same_subcategory".to_string(),
            top_featured(same_sub, RELATED_LIMIT, lang),
        );
    }

    related.insert(
        "popular".to_string(),
        top_featured(others().collect(), RELATED_LIMIT, lang),
    );

    related.retain(|_, list| !list.is_empty());
    related
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback::get_fallback_data;
    use contracts::enums::CategoryKind;

    #[test]
    fn test_related_for_known_col() {
        let cols = get_fallback_data(CategoryKind::Cols, None);
        let related = build_related(&cols, Some("col-du-galibier"), None, Language::Fr);

        let same_region = &related["same_region"];
        assert!(!same_region.is_empty());
        assert!(same_region.iter().all(|c| c.region.as_deref() == Some("alpes")));
        assert!(same_region.iter().all(|c| c.id != "col-du-galibier"));

        let popular = &related["popular"];
        assert_eq!(popular.len(), RELATED_LIMIT);
        assert_eq!(popular[0].id, "col-du-tourmalet");
    }

    #[test]
    fn test_unknown_item_gives_empty_map() {
        let cols = get_fallback_data(CategoryKind::Cols, None);
        assert!(build_related(&cols, Some("col-inconnu"), None, Language::Fr).is_empty());
    }

    #[test]
    fn test_without_item_only_popular() {
        let cols = get_fallback_data(CategoryKind::Cols, None);
        let related = build_related(&cols, None, None, Language::En);
        assert_eq!(related.keys().collect::<Vec<_>>(), vec!["popular"]);
    }
}
