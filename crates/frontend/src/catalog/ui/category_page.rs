//! Category page: URL -> view state -> fetch -> engine -> render, and back
//! to the URL on every interaction.

use contracts::domain::a001_content_item::ContentItem;
use contracts::enums::Language;
use contracts::shared::catalog::engine::run_view;
use contracts::shared::catalog::pagination::pagination_links;
use contracts::shared::catalog::{get_category_config, CategoryConfig, ViewState, PAGE_SIZE};
use leptos::prelude::*;
use thaw::*;

use super::filters::{ActiveFilterTags, CategoryFilters};
use super::item_card::ItemCard;
use super::{seo_head, tr};
use crate::catalog::api::{fetch_category_data, FetchToken};
use crate::catalog::location::{
    current_language, push_view_state, read_view_state, view_state_url, CurrentLocation,
};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;

fn base_path(config: &CategoryConfig, subcategory: Option<&str>) -> String {
    match subcategory {
        Some(sub) => format!("/{}/{}", config.key(), sub),
        None => format!("/{}", config.key()),
    }
}

#[component]
pub fn CategoryPage(category: String, subcategory: Option<String>) -> impl IntoView {
    let lang = current_language();
    match get_category_config(&category) {
        Some(config) => view! {
            <CategoryBrowser config=config subcategory=subcategory lang=lang />
        }
        .into_any(),
        None => {
            seo_head::set_title(&seo_head::page_title(&category, 1));
            seo_head::set_pagination_links(None);
            // minimal header, no filters
            view! {
                <div class="page">
                    <div class="header">
                        <h1 class="header__title">{category}</h1>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn CategoryBrowser(
    config: &'static CategoryConfig,
    subcategory: Option<String>,
    lang: Language,
) -> impl IntoView {
    let location =
        use_context::<CurrentLocation>().expect("CurrentLocation not found in context");

    let base = base_path(config, subcategory.as_deref());
    let default_sort = config.default_sort;

    let view_state = RwSignal::new(read_view_state(Some(config)));
    let items = RwSignal::new(Vec::<ContentItem>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let filters_expanded = RwSignal::new(true);

    // ---- fetch, scoped to this page instance ----
    let token = FetchToken::new();
    {
        let token = token.clone();
        on_cleanup(move || token.cancel());
    }
    {
        let ticket = token.begin();
        let subcategory = subcategory.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_category_data(config.key(), subcategory.as_deref()).await;
            if !token.is_current(ticket) {
                log::debug!("dropping stale response for {}", config.key());
                return;
            }
            match result {
                Ok(v) => {
                    items.set(v);
                    error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load {}: {}", config.key(), e);
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    }

    // ---- URL -> state (back/forward) ----
    Effect::new(move |_| {
        location.search.track();
        let from_url = read_view_state(Some(config));
        if view_state.get_untracked() != from_url {
            view_state.set(from_url);
        }
    });

    // ---- state -> URL ----
    let commit = {
        let base = base.clone();
        Callback::new(move |next: ViewState| {
            push_view_state(&base, &next, default_sort);
            location.search.set(crate::catalog::location::current_search());
            view_state.set(next);
        })
    };

    // ---- engine ----
    let page = Memo::new(move |_| {
        items.with(|items| view_state.with(|state| run_view(items, state, PAGE_SIZE, lang)))
    });
    let effective_state = Memo::new(move |_| {
        let mut state = view_state.get();
        state.page = page.with(|p| p.page);
        state
    });

    // ---- SEO head ----
    {
        let base = base.clone();
        let sub_label = subcategory
            .as_deref()
            .and_then(|s| config.subcategory(s))
            .map(|s| s.label.get(lang));
        Effect::new(move |_| {
            let total_pages = page.with(|p| p.total_pages);
            let state = effective_state.get();
            let label = match sub_label {
                Some(sub) => format!("{} - {}", config.label.get(lang), sub),
                None => config.label.get(lang).to_string(),
            };
            seo_head::set_title(&seo_head::page_title(&label, state.page));
            let links = pagination_links(&base, &state, default_sort, total_pages);
            seo_head::set_pagination_links(Some(&links));
        });
    }

    let href_for = {
        let base = base.clone();
        Callback::new(move |p: usize| {
            let mut state = effective_state.get_untracked();
            state.page = p;
            view_state_url(&base, &state, default_sort)
        })
    };
    let on_page_change = Callback::new(move |p: usize| {
        let mut next = effective_state.get_untracked();
        next.set_page(p);
        commit.run(next);
        if let Some(w) = web_sys::window() {
            w.scroll_to_with_x_and_y(0.0, 0.0);
        }
    });
    let reset_filters = move || {
        let mut next = view_state.get_untracked();
        next.reset_filters();
        commit.run(next);
    };

    let nav_link = move |href: String, text: String, active: bool| {
        let target = href.clone();
        view! {
            <a
                class="chip"
                class:chip--active=active
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
    let current_sub = subcategory.clone();

    view! {
        <div class="page category-page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{config.label.get(lang)}</h1>
                    <p class="header__subtitle">
                        {subcategory
                            .as_deref()
                            .and_then(|s| config.subcategory(s))
                            .map(|s| s.description.get(lang))
                            .unwrap_or_else(|| config.description.get(lang))}
                    </p>
                </div>
            </div>

            <nav class="subcategory-nav">
                {nav_link(format!("/{}", config.key()), tr(lang, "Tout", "All").to_string(), current_sub.is_none())}
                {config
                    .subcategories
                    .iter()
                    .map(|s| {
                        let active = current_sub.as_deref() == Some(s.key);
                        nav_link(format!("/{}/{}", config.key(), s.key), s.label.get(lang).to_string(), active)
                    })
                    .collect_view()}
            </nav>

            <FilterPanel
                title=tr(lang, "Filtres", "Filters")
                is_expanded=filters_expanded
                active_filters_count=Signal::derive(move || view_state.with(|s| s.filters.len()))
                header_extra=move || view! {
                    <span class="result-count">
                        {move || {
                            let p = page.get();
                            format!("{} / {} {}", p.filtered_count, p.total_count, tr(lang, "résultats", "results"))
                        }}
                    </span>
                    <select
                        class="select select--sort"
                        prop:value=move || view_state.with(|s| s.sort.clone())
                        on:change=move |ev| {
                            let mut next = view_state.get_untracked();
                            next.set_sort(event_target_value(&ev));
                            commit.run(next);
                        }
                    >
                        {config
                            .sort_options
                            .iter()
                            .map(|o| view! { <option value=o.key>{o.label.get(lang)}</option> })
                            .collect_view()}
                    </select>
                }
                filter_content=move || view! {
                    <div class="filter-form">
                        <CategoryFilters config=config lang=lang state=view_state on_change=commit />
                    </div>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| reset_filters()>
                        {tr(lang, "Réinitialiser les filtres", "Reset filters")}
                    </Button>
                }
                filter_tags=move || view! {
                    <ActiveFilterTags config=config lang=lang state=view_state on_change=commit />
                }
            />

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || {
                if loading.get() {
                    return view! {
                        <p class="loading">{tr(lang, "Chargement…", "Loading…")}</p>
                    }
                    .into_any();
                }
                let result = page.get();
                if result.items.is_empty() && error.with(|e| e.is_none()) {
                    return view! {
                        <div class="empty-state">
                            <p>{tr(lang, "Aucun résultat pour ces filtres.", "No results for these filters.")}</p>
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| reset_filters()>
                                {tr(lang, "Réinitialiser les filtres", "Reset filters")}
                            </Button>
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <div class="item-grid">
                        {result
                            .items
                            .into_iter()
                            .map(|item| view! { <ItemCard item=item config=config lang=lang /> })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }}

            <PaginationControls
                current_page=Signal::derive(move || page.with(|p| p.page))
                total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                href_for=href_for
                on_page_change=on_page_change
                prev_label=tr(lang, "Page précédente", "Previous page")
                next_label=tr(lang, "Page suivante", "Next page")
            />
        </div>
    }
}
