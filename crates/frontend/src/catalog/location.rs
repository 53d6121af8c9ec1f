//! Browser side of the URL synchronizer: reads `window.location` and
//! pushes history entries. The mapping itself lives in
//! `contracts::shared::catalog::url_sync`.

use std::collections::HashMap;

use contracts::enums::Language;
use contracts::shared::catalog::url_sync;
use contracts::shared::catalog::{CategoryConfig, ViewState};
use leptos::prelude::*;
use web_sys::window;

/// Location as seen by the app; updated on `navigate` and on popstate
#[derive(Clone, Copy)]
pub struct CurrentLocation {
    pub path: RwSignal<String>,
    pub search: RwSignal<String>,
}

impl CurrentLocation {
    pub fn from_window() -> Self {
        Self {
            path: RwSignal::new(current_path()),
            search: RwSignal::new(current_search()),
        }
    }

    /// Re-reads `window.location` after history changed
    pub fn refresh(&self) {
        self.path.set(current_path());
        self.search.set(current_search());
    }

    /// New history entry for another page of the app
    pub fn navigate(&self, url: &str) {
        if let Some(w) = window() {
            if let Ok(history) = w.history() {
                if let Err(e) =
                    history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(url))
                {
                    log::warn!("history.pushState failed: {:?}", e);
                }
            }
        }
        self.refresh();
        if let Some(w) = window() {
            w.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }
}

pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

pub fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// `?lang=en` switches the content language, French otherwise
pub fn current_language() -> Language {
    let params: HashMap<String, String> =
        serde_qs::from_str(current_search().trim_start_matches('?')).unwrap_or_default();
    params
        .get("lang")
        .map(|l| Language::from_code(l))
        .unwrap_or_default()
}

pub fn read_view_state(config: Option<&CategoryConfig>) -> ViewState {
    url_sync::deserialize(&current_search(), config)
}

/// `lang` is not part of the view state, it is carried over as is
fn with_language(url: String, lang: Language) -> String {
    if lang == Language::default() {
        return url;
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}lang={}", lang.code())
}

pub fn view_state_url(base_path: &str, state: &ViewState, default_sort: &str) -> String {
    with_language(
        url_sync::to_url(base_path, state, default_sort),
        current_language(),
    )
}

/// New history entry, no reload. Skipped when the URL would not change.
pub fn push_view_state(base_path: &str, state: &ViewState, default_sort: &str) {
    let url = view_state_url(base_path, state, default_sort);
    if url == format!("{}{}", current_path(), current_search()) {
        return;
    }
    if let Some(w) = window() {
        if let Ok(history) = w.history() {
            if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url)) {
                log::warn!("history.pushState failed: {:?}", e);
            }
        }
    }
}
