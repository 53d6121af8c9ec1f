use crate::shared::icons::icon;
use contracts::shared::catalog::pagination::{page_window, PageItem};
use leptos::prelude::*;

/// Pages shown on each side of the current one
const WINDOW_RADIUS: usize = 2;

/// SEO pager: previous / numbered window with gaps / next.
/// Pages are 1-based; hidden when everything fits on one page.
#[component]
pub fn PaginationControls(
    /// Effective page (already clamped)
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    total_pages: Signal<usize>,

    /// Href of a page, so links stay crawlable
    href_for: Callback<usize, String>,

    on_page_change: Callback<usize>,

    #[prop(optional, into)]
    prev_label: Option<String>,

    #[prop(optional, into)]
    next_label: Option<String>,
) -> impl IntoView {
    let prev_label = prev_label.unwrap_or_else(|| "Précédent".to_string());
    let next_label = next_label.unwrap_or_else(|| "Suivant".to_string());

    // plain click navigates through history instead of reloading
    let go = move |ev: leptos::ev::MouseEvent, page: usize| {
        ev.prevent_default();
        on_page_change.run(page);
    };

    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <nav class="pagination-controls" aria-label="pagination">
                <a
                    class="pagination-btn"
                    class:pagination-btn--disabled=move || current_page.get() <= 1
                    href=move || href_for.run(current_page.get().saturating_sub(1).max(1))
                    rel="prev"
                    title=prev_label.clone()
                    on:click=move |ev| {
                        let page = current_page.get();
                        if page > 1 {
                            go(ev, page - 1);
                        } else {
                            ev.prevent_default();
                        }
                    }
                >
                    {icon("chevron-left")}
                </a>

                {move || {
                    page_window(current_page.get(), total_pages.get(), WINDOW_RADIUS)
                        .into_iter()
                        .map(|entry| match entry {
                            PageItem::Page(page) => {
                                let is_current = page == current_page.get();
                                view! {
                                    <a
                                        class="pagination-page"
                                        class:pagination-page--current=is_current
                                        aria-current=is_current.then_some("page")
                                        href=href_for.run(page)
                                        on:click=move |ev| go(ev, page)
                                    >
                                        {page}
                                    </a>
                                }
                                .into_any()
                            }
                            PageItem::Gap => view! { <span class="pagination-gap">"…"</span> }.into_any(),
                        })
                        .collect_view()
                }}

                <a
                    class="pagination-btn"
                    class:pagination-btn--disabled={move || current_page.get() >= total_pages.get()}
                    href=move || href_for.run((current_page.get() + 1).min(total_pages.get().max(1)))
                    rel="next"
                    title=next_label.clone()
                    on:click=move |ev| {
                        let page = current_page.get();
                        if page < total_pages.get() {
                            go(ev, page + 1);
                        } else {
                            ev.prevent_default();
                        }
                    }
                >
                    {icon("chevron-right")}
                </a>
            </nav>
        </Show>
    }
}
