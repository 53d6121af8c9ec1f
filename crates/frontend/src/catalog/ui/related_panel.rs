use contracts::enums::Language;
use contracts::shared::catalog::dto::RelatedContent;
use contracts::shared::catalog::CategoryConfig;
use leptos::prelude::*;

use super::item_card::ItemCard;
use super::tr;

fn group_title(relation: &str, lang: Language) -> String {
    match relation {
        "same_region" => tr(lang, "Dans la même région", "In the same region").to_string(),
        "same_subcategory" => tr(lang, "Dans la même sélection", "In the same selection").to_string(),
        "popular" => tr(lang, "Les plus populaires", "Most popular").to_string(),
        other => other.replace('_', " "),
    }
}

/// Related items grouped by relation type. Renders nothing for an empty map.
#[component]
pub fn RelatedPanel(
    #[prop(into)] related: Signal<RelatedContent>,
    config: &'static CategoryConfig,
    lang: Language,
) -> impl IntoView {
    move || {
        let related = related.get();
        (!related.is_empty()).then(|| {
            view! {
                <aside class="related-panel">
                    {related
                        .into_iter()
                        .map(|(relation, items)| {
                            view! {
                                <section class="related-panel__group">
                                    <h3>{group_title(&relation, lang)}</h3>
                                    <div class="item-grid item-grid--compact">
                                        {items
                                            .into_iter()
                                            .map(|item| view! { <ItemCard item=item config=config lang=lang /> })
                                            .collect_view()}
                                    </div>
                                </section>
                            }
                        })
                        .collect_view()}
                </aside>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_titles() {
        assert_eq!(group_title("popular", Language::En), "Most popular");
        assert_eq!(group_title("same_tags", Language::Fr), "same tags");
    }
}
