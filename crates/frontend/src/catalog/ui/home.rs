use super::tr;
use crate::catalog::location::{current_language, CurrentLocation};
use crate::catalog::ui::seo_head;
use contracts::shared::catalog::all_categories;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let location =
        use_context::<CurrentLocation>().expect("CurrentLocation not found in context");
    let lang = current_language();

    seo_head::set_title("Velo-Altitude");
    seo_head::set_pagination_links(None);

    let link = move |href: String, text: String, class: &'static str| {
        let target = href.clone();
        view! {
            <a
                class=class
                href=href
                on:click=move |ev| {
                    ev.prevent_default();
                    location.navigate(&target);
                }
            >
                {text}
            </a>
        }
    };

    view! {
        <div class="page home-page">
            <div class="header">
                <h1 class="header__title">
                    {tr(lang, "Les cols et leurs défis", "Climbs and their challenges")}
                </h1>
            </div>
            <div class="category-grid">
                {all_categories()
                    .into_iter()
                    .map(|config| {
                        let key = config.key();
                        view! {
                            <section class="category-card">
                                <h2>
                                    {link(format!("/{key}"), config.label.get(lang).to_string(), "category-card__title")}
                                </h2>
                                <p class="category-card__description">{config.description.get(lang)}</p>
                                <div class="category-card__subcategories">
                                    {config
                                        .subcategories
                                        .iter()
                                        .map(|sub| {
                                            link(
                                                format!("/{key}/{}", sub.key),
                                                sub.label.get(lang).to_string(),
                                                "chip",
                                            )
                                        })
                                        .collect_view()}
                                </div>
                            </section>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
