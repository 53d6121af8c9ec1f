use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::localized::LocalizedLabel;

/// Reserved query keys, never treated as filters
pub const RESERVED_KEYS: &[&str] = &["page", "sort", "lang"];

pub const MIN_SUFFIX: &str = "_min";
pub const MAX_SUFFIX: &str = "_max";

// ============================================================================
// Static definitions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: LocalizedLabel,
}

/// Filter metadata of a category (static, read-only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterDefinition {
    /// Free text over name, description and tags
    Search {
        key: &'static str,
        label: LocalizedLabel,
    },
    /// One value out of `options`
    Select {
        key: &'static str,
        label: LocalizedLabel,
        options: &'static [FilterOption],
    },
    /// Numeric bounds; produces `<key>_min` / `<key>_max`
    Range {
        key: &'static str,
        label: LocalizedLabel,
        min: f64,
        max: f64,
        step: f64,
        unit: Option<&'static str>,
    },
    /// Any of `options` present in the item's array field
    MultiSelect {
        key: &'static str,
        label: LocalizedLabel,
        options: &'static [FilterOption],
    },
}

impl FilterDefinition {
    pub fn key(&self) -> &'static str {
        match self {
            FilterDefinition::Search { key, .. }
            | FilterDefinition::Select { key, .. }
            | FilterDefinition::Range { key, .. }
            | FilterDefinition::MultiSelect { key, .. } => key,
        }
    }

    pub fn label(&self) -> LocalizedLabel {
        match self {
            FilterDefinition::Search { label, .. }
            | FilterDefinition::Select { label, .. }
            | FilterDefinition::Range { label, .. }
            | FilterDefinition::MultiSelect { label, .. } => *label,
        }
    }

    pub fn is_multi_select(&self) -> bool {
        matches!(self, FilterDefinition::MultiSelect { .. })
    }

    /// Active-state keys this definition can produce
    pub fn state_keys(&self) -> Vec<String> {
        match self {
            FilterDefinition::Range { key, .. } => {
                vec![format!("{key}{MIN_SUFFIX}"), format!("{key}{MAX_SUFFIX}")]
            }
            other => vec![other.key().to_string()],
        }
    }
}

// ============================================================================
// Active state
// ============================================================================

/// Value selected by the user for one filter key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    List(Vec<String>),
    Number(f64),
    Text(String),
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::List(values) => values.is_empty(),
            FilterValue::Text(s) => s.trim().is_empty(),
            FilterValue::Number(n) => n.is_nan(),
        }
    }

    /// Query-string form (lists comma-joined, not yet percent-encoded)
    pub fn to_query_value(&self) -> String {
        match self {
            FilterValue::List(values) => values.join(","),
            FilterValue::Number(n) => n.to_string(),
            FilterValue::Text(s) => s.clone(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) => s.trim().parse().ok(),
            FilterValue::List(_) => None,
        }
    }

    /// Comma-separated list as it appears in the URL; blank entries dropped
    pub fn split_list(raw: &str) -> FilterValue {
        FilterValue::List(
            raw.split(',')
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Multi-select form: scalars become a one-element list, entries holding
    /// commas are split the way the URL would split them
    pub fn into_list(self) -> FilterValue {
        match self {
            FilterValue::List(values) => FilterValue::split_list(&values.join(",")),
            other => FilterValue::split_list(&other.to_query_value()),
        }
    }

    /// Single-value form: lists are comma-joined
    pub fn into_scalar(self) -> FilterValue {
        match self {
            FilterValue::List(values) => FilterValue::Text(values.join(",")),
            other => other,
        }
    }
}

fn is_bound_key(key: &str) -> bool {
    key.ends_with(MIN_SUFFIX) || key.ends_with(MAX_SUFFIX)
}

/// Range bounds are kept as numbers, every other scalar as text, which is
/// what a value read back from the URL looks like
fn normalize(key: &str, value: FilterValue) -> FilterValue {
    match value {
        FilterValue::Text(s) if is_bound_key(key) => match s.trim().parse::<f64>() {
            Ok(n) => FilterValue::Number(n),
            Err(_) => FilterValue::Text(s),
        },
        FilterValue::Number(n) if !is_bound_key(key) => FilterValue::Text(n.to_string()),
        other => other,
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::List(values)
    }
}

/// Active filters: key -> value. A missing key means "no constraint".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilters(BTreeMap<String, FilterValue>);

impl ActiveFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value; empty values and reserved keys remove the entry instead.
    /// `_min`/`_max` text is stored as a number, other numbers as text.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        let key = key.into();
        let value = normalize(&key, value.into());
        if value.is_empty() || RESERVED_KEYS.contains(&key.as_str()) {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<FilterValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.0.get(key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FilterValue)> {
        self.0.iter()
    }

    /// Range bound update: the derived key exists only while the bound
    /// differs from the definition's default.
    pub fn set_range_bound(&mut self, key: &str, suffix: &str, value: f64, default: f64) {
        let derived = format!("{key}{suffix}");
        if (value - default).abs() < f64::EPSILON {
            self.0.remove(&derived);
        } else {
            self.0.insert(derived, FilterValue::Number(value));
        }
    }
}

impl<K: Into<String>, V: Into<FilterValue>> FromIterator<(K, V)> for ActiveFilters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = ActiveFilters::new();
        for (key, value) in iter {
            filters.set(key, value);
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_remove_key() {
        let mut filters = ActiveFilters::new();
        filters.set("difficulty", "5");
        filters.set("features", vec!["panorama".to_string()]);
        assert_eq!(filters.len(), 2);

        filters.set("difficulty", "  ");
        filters.set("features", Vec::<String>::new());
        assert!(filters.is_empty());
    }

    #[test]
    fn test_reserved_keys_are_ignored() {
        let mut filters = ActiveFilters::new();
        filters.set("page", "3");
        filters.set("sort", "name_asc");
        assert!(filters.is_empty());
    }

    #[test]
    fn test_range_bound_at_default_is_dropped() {
        let mut filters = ActiveFilters::new();
        filters.set_range_bound("altitude", MIN_SUFFIX, 2000.0, 0.0);
        filters.set_range_bound("altitude", MAX_SUFFIX, 3000.0, 3000.0);
        assert_eq!(filters.get("altitude_min"), Some(&FilterValue::Number(2000.0)));
        assert_eq!(filters.get("altitude_max"), None);

        filters.set_range_bound("altitude", MIN_SUFFIX, 0.0, 0.0);
        assert!(filters.is_empty());
    }

    #[test]
    fn test_query_value_formatting() {
        assert_eq!(FilterValue::Number(2000.0).to_query_value(), "2000");
        assert_eq!(FilterValue::Number(7.5).to_query_value(), "7.5");
        assert_eq!(
            FilterValue::List(vec!["alpes".into(), "pyrenees".into()]).to_query_value(),
            "alpes,pyrenees"
        );
    }

    #[test]
    fn test_set_normalizes_scalars() {
        let mut filters = ActiveFilters::new();
        filters.set("altitude_max", "2500");
        filters.set("gradient_min", "raide");
        filters.set("difficulty", 5.0);
        assert_eq!(filters.get("altitude_max"), Some(&FilterValue::Number(2500.0)));
        assert_eq!(filters.get("gradient_min"), Some(&FilterValue::Text("raide".to_string())));
        assert_eq!(filters.get("difficulty"), Some(&FilterValue::Text("5".to_string())));
    }

    #[test]
    fn test_list_conversions() {
        assert_eq!(
            FilterValue::from("panorama").into_list(),
            FilterValue::List(vec!["panorama".to_string()])
        );
        assert_eq!(
            FilterValue::List(vec!["a,b".to_string(), "c".to_string()]).into_list(),
            FilterValue::List(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert_eq!(
            FilterValue::List(vec!["a".to_string(), "b".to_string()]).into_scalar(),
            FilterValue::Text("a,b".to_string())
        );
        assert_eq!(FilterValue::split_list(", ,"), FilterValue::List(vec![]));
    }
}
