use serde::{Deserialize, Serialize};

use super::filter::{ActiveFilters, FilterValue};
use super::registry::{CategoryConfig, DEFAULT_SORT};

/// What a category page renders: filters, sort and current page.
/// Every filter or sort change sends the user back to page 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub filters: ActiveFilters,
    pub sort: String,
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            filters: ActiveFilters::new(),
            sort: DEFAULT_SORT.to_string(),
            page: 1,
        }
    }
}

impl ViewState {
    pub fn for_category(config: &CategoryConfig) -> Self {
        Self {
            sort: config.default_sort.to_string(),
            ..Self::default()
        }
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.filters.set(key, value);
        self.page = 1;
    }

    /// Like `set_filter`, shaping the value the way the category's URL
    /// would read it back: multi-select keys hold lists, other keys scalars.
    pub fn set_filter_for(
        &mut self,
        config: &CategoryConfig,
        key: &str,
        value: impl Into<FilterValue>,
    ) {
        let value = value.into();
        let value = if config.multi_select_keys().iter().any(|k| *k == key) {
            value.into_list()
        } else {
            value.into_scalar()
        };
        self.set_filter(key, value);
    }

    pub fn remove_filter(&mut self, key: &str) {
        self.filters.remove(key);
        self.page = 1;
    }

    pub fn set_range_bound(&mut self, key: &str, suffix: &str, value: f64, default: f64) {
        self.filters.set_range_bound(key, suffix, value, default);
        self.page = 1;
    }

    pub fn reset_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: impl Into<String>) {
        self.sort = sort.into();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}
