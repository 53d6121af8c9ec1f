use contracts::domain::a001_content_item::ContentItem;
use contracts::shared::catalog::dto::RelatedContent;
use contracts::shared::catalog::get_category_config;
use leptos::prelude::*;

use super::item_card::card_facts;
use super::related_panel::RelatedPanel;
use super::{seo_head, tr};
use crate::catalog::api::{fetch_item, fetch_related_content, FetchToken};
use crate::catalog::location::{current_language, CurrentLocation};

/// Detail page `/{category}/{id or slug}` with its related content
#[component]
pub fn ItemPage(category: String, item_key: String) -> impl IntoView {
    let location =
        use_context::<CurrentLocation>().expect("CurrentLocation not found in context");
    let lang = current_language();

    let Some(config) = get_category_config(&category) else {
        seo_head::set_title("Velo-Altitude");
        return view! {
            <div class="page">
                <h1 class="header__title">{category}</h1>
            </div>
        }
        .into_any();
    };

    let item = RwSignal::new(None::<ContentItem>);
    let related = RwSignal::new(RelatedContent::new());
    let error = RwSignal::new(None::<String>);

    let token = FetchToken::new();
    {
        let token = token.clone();
        on_cleanup(move || token.cancel());
    }

    let ticket = token.begin();
    let key = item_key.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetch_item(config.key(), &key).await;
        if !token.is_current(ticket) {
            return;
        }
        match result {
            Ok(found) => {
                seo_head::set_title(&seo_head::page_title(found.name.get(lang), 1));
                let sub = found.subcategory.clone();
                let id = found.id.clone();
                item.set(Some(found));
                let rel = fetch_related_content(config.key(), sub.as_deref(), &id, lang).await;
                if token.is_current(ticket) {
                    related.set(rel);
                }
            }
            Err(e) => {
                log::error!("Failed to load {}/{}: {}", config.key(), key, e);
                error.set(Some(e));
            }
        }
    });
    seo_head::set_pagination_links(None);

    let back_href = format!("/{}", config.key());
    let back_target = back_href.clone();

    view! {
        <div class="page item-page">
            <a
                class="back-link"
                href=back_href
                on:click=move |ev| {
                    ev.prevent_default();
                    location.navigate(&back_target);
                }
            >
                {"← "}{config.label.get(lang)}
            </a>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || match item.get() {
                None if error.get().is_none() => view! {
                    <p class="loading">{tr(lang, "Chargement…", "Loading…")}</p>
                }
                .into_any(),
                None => view! { <></> }.into_any(),
                Some(found) => view! {
                    <article class="item-detail">
                        <h1 class="header__title">{found.name.get(lang).to_string()}</h1>
                        <ul class="item-detail__facts">
                            {card_facts(&found, config, lang)
                                .into_iter()
                                .map(|f| view! { <li>{f}</li> })
                                .collect_view()}
                        </ul>
                        <p class="item-detail__description">{found.description.get(lang).to_string()}</p>
                        {found.timestamp().map(|t| view! {
                            <p class="item-detail__updated">
                                {tr(lang, "Mis à jour le ", "Updated on ")}
                                {t.format("%d/%m/%Y").to_string()}
                            </p>
                        })}
                    </article>
                }
                .into_any(),
            }}

            <RelatedPanel related=related config=config lang=lang />
        </div>
    }
    .into_any()
}
