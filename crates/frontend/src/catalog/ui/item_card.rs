use contracts::domain::a001_content_item::ContentItem;
use contracts::enums::Language;
use contracts::shared::catalog::{CategoryConfig, FilterDefinition};
use leptos::prelude::*;

use crate::catalog::location::CurrentLocation;

const DESCRIPTION_MAX_CHARS: usize = 160;

/// Short figures shown on a card: one per range filter of the category
pub fn card_facts(item: &ContentItem, config: &CategoryConfig, lang: Language) -> Vec<String> {
    config
        .filters
        .iter()
        .filter_map(|def| match def {
            FilterDefinition::Range { key, label, unit, .. } => {
                let value = item.number(key)?;
                let unit = unit.map(|u| format!(" {u}")).unwrap_or_default();
                Some(format!("{}: {}{}", label.get(lang), value, unit))
            }
            _ => None,
        })
        .collect()
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

#[component]
pub fn ItemCard(
    item: ContentItem,
    config: &'static CategoryConfig,
    lang: Language,
) -> impl IntoView {
    let location =
        use_context::<CurrentLocation>().expect("CurrentLocation not found in context");

    let href = format!("/{}/{}", config.key(), item.route_key());
    let target = href.clone();
    let facts = card_facts(&item, config, lang);
    let name = item.name.get(lang).to_string();
    let description = truncate_chars(item.description.get(lang), DESCRIPTION_MAX_CHARS);
    let is_featured = item.featured.is_some_and(|f| f > 0);

    view! {
        <article class="item-card" class:item-card--featured=is_featured>
            <h3 class="item-card__title">
                <a
                    href=href
                    on:click=move |ev| {
                        ev.prevent_default();
                        location.navigate(&target);
                    }
                >
                    {name}
                </a>
            </h3>
            <p class="item-card__description">{description}</p>
            <ul class="item-card__facts">
                {facts.into_iter().map(|f| view! { <li>{f}</li> }).collect_view()}
            </ul>
            <div class="item-card__tags">
                {item
                    .tags
                    .into_iter()
                    .map(|t| view! { <span class="chip chip--small">{t}</span> })
                    .collect_view()}
            </div>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::catalog::get_category_config;

    #[test]
    fn test_card_facts_use_range_filters() {
        let item: ContentItem = serde_json::from_value(serde_json::json!({
            "id": "col-du-tourmalet",
            "name": "Col du Tourmalet",
            "altitude": 2115,
            "gradient": 7.4
        }))
        .unwrap();
        let config = get_category_config("cols").unwrap();
        let facts = card_facts(&item, config, Language::Fr);
        assert_eq!(facts.len(), 2);
        assert!(facts[0].starts_with("Altitude: 2115"));
        assert!(facts[0].ends_with(" m"));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("court", 10), "court");
        assert_eq!(truncate_chars("Le géant des Pyrénées", 9), "Le géant…");
    }
}
