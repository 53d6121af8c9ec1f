//! View state <-> query string
//!
//! `?page={n>1}&sort={key}&{filter}={value|csv}`. Page 1 and the default
//! sort are never written, so the canonical URL of an untouched page has
//! no query at all.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::filter::FilterValue;
use super::registry::{CategoryConfig, DEFAULT_SORT};
use super::view_state::ViewState;

fn encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

fn encode_value(value: &FilterValue) -> String {
    match value {
        FilterValue::List(values) => values
            .iter()
            .map(|v| encode(v).into_owned())
            .collect::<Vec<_>>()
            .join(","),
        other => encode(&other.to_query_value()).into_owned(),
    }
}

/// Query string without the leading `?`
pub fn serialize(state: &ViewState, default_sort: &str) -> String {
    let mut parts: Vec<String> = state
        .filters
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", encode(key), encode_value(value)))
        .collect();

    if state.page > 1 {
        parts.push(format!("page={}", state.page));
    }
    if state.sort != default_sort && !state.sort.is_empty() {
        parts.push(format!("sort={}", encode(&state.sort)));
    }

    parts.join("&")
}

/// `path` plus the serialized query, if any
pub fn to_url(path: &str, state: &ViewState, default_sort: &str) -> String {
    let query = serialize(state, default_sort);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Parses a query string (with or without `?`). The category config tells
/// which keys hold comma-separated lists. A query `serde_qs` rejects
/// (repeated or bracketed keys) reads as the default state.
pub fn deserialize(query: &str, config: Option<&CategoryConfig>) -> ViewState {
    let default_sort = config.map(|c| c.default_sort).unwrap_or(DEFAULT_SORT);
    let multi_keys = config.map(|c| c.multi_select_keys()).unwrap_or_default();

    let mut state = ViewState {
        sort: default_sort.to_string(),
        ..ViewState::default()
    };

    let params: BTreeMap<String, String> =
        serde_qs::from_str(query.trim_start_matches('?')).unwrap_or_default();

    for (key, value) in params {
        match key.as_str() {
            "page" => {
                state.page = value
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|p| *p >= 1)
                    .unwrap_or(1);
            }
            "sort" => {
                if !value.trim().is_empty() {
                    state.sort = value;
                }
            }
            _ if multi_keys.iter().any(|k| *k == key) => {
                state.filters.set(key, FilterValue::split_list(&value));
            }
            _ => state.filters.set(key, value.as_str()),
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::catalog::registry::get_category_config;

    fn cols() -> &'static CategoryConfig {
        get_category_config("cols").unwrap()
    }

    #[test]
    fn test_default_state_has_empty_query() {
        let state = ViewState::for_category(cols());
        assert_eq!(serialize(&state, cols().default_sort), "");
        assert_eq!(to_url("/cols", &state, cols().default_sort), "/cols");
    }

    #[test]
    fn test_serialize_order_and_omissions() {
        let mut state = ViewState::for_category(cols());
        state.set_filter("difficulty", "5");
        state.set_filter("features", vec!["panorama".to_string(), "historic".to_string()]);
        assert_eq!(
            serialize(&state, "featured"),
            "difficulty=5&features=panorama,historic"
        );

        state.set_sort("altitude");
        state.set_page(3);
        assert_eq!(
            serialize(&state, "featured"),
            "difficulty=5&features=panorama,historic&page=3&sort=altitude"
        );

        state.set_page(1);
        state.set_sort("featured");
        assert_eq!(
            serialize(&state, "featured"),
            "difficulty=5&features=panorama,historic"
        );
    }

    #[test]
    fn test_round_trip() {
        let mut state = ViewState::for_category(cols());
        state.set_filter("search", "col d'Izoard & co");
        state.set_filter("country", "france");
        state.set_filter("altitude_min", 2000.0);
        state.set_filter("gradient_max", 9.5);
        state.set_filter("features", vec!["tour_de_france".to_string(), "panorama".to_string()]);
        state.set_sort("name_desc");
        state.set_page(2);

        let query = serialize(&state, cols().default_sort);
        assert_eq!(deserialize(&query, Some(cols())), state);
        assert_eq!(deserialize(&format!("?{query}"), Some(cols())), state);
    }

    #[test]
    fn test_round_trip_of_loosely_typed_state() {
        let mut state = ViewState::for_category(cols());
        state.set_filter_for(cols(), "features", "panorama");
        state.set_filter_for(cols(), "altitude_max", "2500");
        state.set_filter_for(cols(), "difficulty", 5.0);
        assert_eq!(
            state.filters.get("features"),
            Some(&FilterValue::List(vec!["panorama".to_string()]))
        );
        assert_eq!(state.filters.get("altitude_max"), Some(&FilterValue::Number(2500.0)));

        let query = serialize(&state, cols().default_sort);
        assert_eq!(deserialize(&query, Some(cols())), state);
    }

    #[test]
    fn test_list_values_with_commas_are_split() {
        let mut state = ViewState::for_category(cols());
        state.set_filter_for(cols(), "features", vec!["a,b".to_string(), " ".to_string()]);
        assert_eq!(
            state.filters.get("features"),
            Some(&FilterValue::List(vec!["a".to_string(), "b".to_string()]))
        );
        let query = serialize(&state, cols().default_sort);
        assert_eq!(deserialize(&query, Some(cols())), state);
    }

    #[test]
    fn test_percent_decoding() {
        let state = deserialize("sort=name%5Fdesc&country=fr%61nce&page=%32", Some(cols()));
        assert_eq!(state.sort, "name_desc");
        assert_eq!(state.page, 2);
        assert_eq!(
            state.filters.get("country"),
            Some(&FilterValue::Text("france".to_string()))
        );
    }

    #[test]
    fn test_deserialize_tolerates_garbage() {
        let state = deserialize("?page=abc&sort=&difficulty=&features=,", Some(cols()));
        assert_eq!(state, ViewState::for_category(cols()));

        let state = deserialize("page=0", Some(cols()));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_deserialize_plus_as_space() {
        let state = deserialize("search=col+du+galibier", Some(cols()));
        assert_eq!(
            state.filters.get("search"),
            Some(&FilterValue::Text("col du galibier".to_string()))
        );
    }

    #[test]
    fn test_without_config_lists_stay_scalar() {
        let state = deserialize("features=panorama,historic", None);
        assert_eq!(
            state.filters.get("features"),
            Some(&FilterValue::Text("panorama,historic".to_string()))
        );
        assert_eq!(state.sort, DEFAULT_SORT);
    }
}
