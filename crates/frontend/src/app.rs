use crate::catalog::location::CurrentLocation;
use crate::catalog::ui::category_page::CategoryPage;
use crate::catalog::ui::home::HomePage;
use crate::catalog::ui::item_page::ItemPage;
use crate::shared::icons::icon;
use crate::shared::identity::use_identity;
use contracts::shared::catalog::get_category_config;
use leptos::prelude::*;

/// Page selected by the URL path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    /// `/{category}` or `/{category}/{subcategory}`
    Category {
        category: String,
        subcategory: Option<String>,
    },
    /// `/{category}/{id or slug}`
    Item { category: String, key: String },
}

pub fn parse_route(path: &str) -> Route {
    let mut segments = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).map(|c| c.into_owned()).unwrap_or_else(|_| s.to_string()));

    let Some(category) = segments.next() else {
        return Route::Home;
    };
    match segments.next() {
        None => Route::Category {
            category,
            subcategory: None,
        },
        Some(segment) => {
            let is_subcategory = get_category_config(&category)
                .map_or(false, |c| c.subcategory(&segment).is_some());
            if is_subcategory {
                Route::Category {
                    category,
                    subcategory: Some(segment),
                }
            } else {
                Route::Item {
                    category,
                    key: segment,
                }
            }
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let location = CurrentLocation::from_window();
    provide_context(location);

    // back/forward buttons
    let handle = window_event_listener(leptos::ev::popstate, move |_| location.refresh());
    on_cleanup(move || handle.remove());

    let identity = use_identity();
    let route = Memo::new(move |_| parse_route(&location.path.get()));

    view! {
        <div class="app">
            <header class="app-header">
                <a
                    class="app-header__brand"
                    href="/"
                    on:click=move |ev| {
                        ev.prevent_default();
                        location.navigate("/");
                    }
                >
                    {icon("mountain")}
                    <span>"Velo-Altitude"</span>
                </a>
                <span class="app-header__user">
                    {icon("user")}
                    {identity.display_name().to_string()}
                </span>
            </header>
            <main class="app-main">
                {move || match route.get() {
                    Route::Home => view! { <HomePage /> }.into_any(),
                    Route::Category { category, subcategory } => view! {
                        <CategoryPage category=category subcategory=subcategory />
                    }
                    .into_any(),
                    Route::Item { category, key } => view! {
                        <ItemPage category=category item_key=key />
                    }
                    .into_any(),
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route() {
        assert_eq!(parse_route("/"), Route::Home);
        assert_eq!(
            parse_route("/cols"),
            Route::Category {
                category: "cols".into(),
                subcategory: None
            }
        );
        assert_eq!(
            parse_route("/cols/alpes/"),
            Route::Category {
                category: "cols".into(),
                subcategory: Some("alpes".into())
            }
        );
        assert_eq!(
            parse_route("/cols/col-du-galibier"),
            Route::Item {
                category: "cols".into(),
                key: "col-du-galibier".into()
            }
        );
        // unknown categories still get a (minimal) category page
        assert_eq!(
            parse_route("/routes"),
            Route::Category {
                category: "routes".into(),
                subcategory: None
            }
        );
    }
}
