//! Filter form and active-filter chips of a category page.

use contracts::enums::Language;
use contracts::shared::catalog::filter::{MAX_SUFFIX, MIN_SUFFIX};
use contracts::shared::catalog::{CategoryConfig, FilterDefinition, FilterOption, FilterValue, ViewState};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::tr;
use crate::shared::components::filter_panel::FilterTag;

const SEARCH_DEBOUNCE_MS: u32 = 300;

fn option_label(options: &[FilterOption], value: &str, lang: Language) -> String {
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.get(lang).to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Text of the chip for one active-state entry
pub fn chip_label(config: &CategoryConfig, key: &str, value: &FilterValue, lang: Language) -> String {
    let (base, bound) = if let Some(base) = key.strip_suffix(MIN_SUFFIX) {
        (base, Some("≥"))
    } else if let Some(base) = key.strip_suffix(MAX_SUFFIX) {
        (base, Some("≤"))
    } else {
        (key, None)
    };

    let Some(def) = config.filter(base) else {
        return format!("{key}: {}", value.to_query_value());
    };
    let label = def.label().get(lang);

    match (def, bound) {
        (FilterDefinition::Range { unit, .. }, Some(op)) => {
            let unit = unit.map(|u| format!(" {u}")).unwrap_or_default();
            format!("{label} {op} {}{unit}", value.to_query_value())
        }
        (FilterDefinition::Select { options, .. }, _) => {
            format!("{label}: {}", option_label(options, &value.to_query_value(), lang))
        }
        (FilterDefinition::MultiSelect { options, .. }, _) => {
            let values = match value {
                FilterValue::List(values) => values.clone(),
                other => vec![other.to_query_value()],
            };
            let labels: Vec<String> = values
                .iter()
                .map(|v| option_label(options, v, lang))
                .collect();
            format!("{label}: {}", labels.join(", "))
        }
        _ => format!("{label}: {}", value.to_query_value()),
    }
}

fn text_value(state: &ViewState, key: &str) -> String {
    state
        .filters
        .get(key)
        .map(|v| v.to_query_value())
        .unwrap_or_default()
}

fn list_contains(state: &ViewState, key: &str, value: &str) -> bool {
    match state.filters.get(key) {
        Some(FilterValue::List(values)) => values.iter().any(|v| v == value),
        Some(other) => other.to_query_value() == value,
        None => false,
    }
}

/// Form fields for every filter definition of the category
#[component]
pub fn CategoryFilters(
    config: &'static CategoryConfig,
    lang: Language,
    #[prop(into)] state: Signal<ViewState>,
    on_change: Callback<ViewState>,
) -> impl IntoView {
    let edit = move |f: &dyn Fn(&mut ViewState)| {
        let mut next = state.get_untracked();
        f(&mut next);
        on_change.run(next);
    };

    config
        .filters
        .iter()
        .map(|def| {
            let key = def.key();
            let label = def.label().get(lang);
            match *def {
                FilterDefinition::Search { .. } => {
                    let pending = StoredValue::new(0u64);
                    view! {
                        <div class="form-group form-group--search">
                            <label>{label}</label>
                            <input
                                type="search"
                                class="input"
                                placeholder=tr(lang, "Rechercher…", "Search…")
                                prop:value=move || text_value(&state.get(), key)
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    pending.update_value(|p| *p += 1);
                                    let ticket = pending.get_value();
                                    spawn_local(async move {
                                        TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
                                        if pending.try_get_value() == Some(ticket) {
                                            edit(&|s| s.set_filter_for(config, key, value.as_str()));
                                        }
                                    });
                                }
                            />
                        </div>
                    }
                    .into_any()
                }
                FilterDefinition::Select { options, .. } => view! {
                    <div class="form-group">
                        <label>{label}</label>
                        <select
                            class="select"
                            prop:value=move || text_value(&state.get(), key)
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                if value.is_empty() {
                                    edit(&|s| s.remove_filter(key));
                                } else {
                                    edit(&|s| s.set_filter_for(config, key, value.as_str()));
                                }
                            }
                        >
                            <option value="">{tr(lang, "Tous", "All")}</option>
                            {options
                                .iter()
                                .map(|o| view! { <option value=o.value>{o.label.get(lang)}</option> })
                                .collect_view()}
                        </select>
                    </div>
                }
                .into_any(),
                FilterDefinition::Range { min, max, step, unit, .. } => {
                    let bound_input = move |suffix: &'static str, default: f64| {
                        let derived = format!("{key}{suffix}");
                        let read_key = derived.clone();
                        view! {
                            <input
                                type="number"
                                class="input input--small"
                                min=min.to_string()
                                max=max.to_string()
                                step=step.to_string()
                                placeholder=default.to_string()
                                prop:value=move || text_value(&state.get(), &read_key)
                                on:change=move |ev| {
                                    let raw = event_target_value(&ev);
                                    match raw.trim().parse::<f64>() {
                                        Ok(v) => edit(&|s| s.set_range_bound(key, suffix, v.clamp(min, max), default)),
                                        Err(_) => edit(&|s| s.remove_filter(&derived)),
                                    }
                                }
                            />
                        }
                    };
                    view! {
                        <div class="form-group form-group--range">
                            <label>
                                {label}
                                {unit.map(|u| format!(" ({u})"))}
                            </label>
                            <div class="range-inputs">
                                {bound_input(MIN_SUFFIX, min)}
                                <span>"–"</span>
                                {bound_input(MAX_SUFFIX, max)}
                            </div>
                        </div>
                    }
                    .into_any()
                }
                FilterDefinition::MultiSelect { options, .. } => view! {
                    <fieldset class="form-group form-group--multi">
                        <legend>{label}</legend>
                        {options
                            .iter()
                            .map(|o| {
                                let value = o.value;
                                view! {
                                    <label class="checkbox">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || list_contains(&state.get(), key, value)
                                            on:change=move |ev| {
                                                let checked = event_target_checked(&ev);
                                                edit(&|s| {
                                                    let mut values: Vec<String> = match s.filters.get(key) {
                                                        Some(FilterValue::List(v)) => v.clone(),
                                                        _ => Vec::new(),
                                                    };
                                                    values.retain(|v| v != value);
                                                    if checked {
                                                        values.push(value.to_string());
                                                    }
                                                    s.set_filter_for(config, key, values);
                                                });
                                            }
                                        />
                                        <span>{o.label.get(lang)}</span>
                                    </label>
                                }
                            })
                            .collect_view()}
                    </fieldset>
                }
                .into_any(),
            }
        })
        .collect_view()
}

/// One removable chip per active filter entry
#[component]
pub fn ActiveFilterTags(
    config: &'static CategoryConfig,
    lang: Language,
    #[prop(into)] state: Signal<ViewState>,
    on_change: Callback<ViewState>,
) -> impl IntoView {
    move || {
        state
            .get()
            .filters
            .iter()
            .map(|(key, value)| {
                let key = key.clone();
                let label = chip_label(config, &key, value, lang);
                view! {
                    <FilterTag
                        label=label
                        on_remove=Callback::new(move |_| {
                            let mut next = state.get_untracked();
                            next.remove_filter(&key);
                            on_change.run(next);
                        })
                    />
                }
            })
            .collect_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::catalog::get_category_config;

    #[test]
    fn test_chip_labels() {
        let cols = get_category_config("cols").unwrap();
        assert_eq!(
            chip_label(cols, "altitude_min", &FilterValue::Number(2000.0), Language::Fr),
            "Altitude ≥ 2000 m"
        );
        assert_eq!(
            chip_label(cols, "unknown", &FilterValue::from("x"), Language::Fr),
            "unknown: x"
        );
        let search = chip_label(cols, "search", &FilterValue::from("ventoux"), Language::En);
        assert!(search.ends_with(": ventoux"));
    }
}
