use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::filter::{FilterDefinition, FilterOption};
use super::pagination::PaginationLinks;
use super::registry::{CategoryConfig, SortOption, Subcategory};
use crate::domain::a001_content_item::ContentItem;

type Translations = BTreeMap<String, String>;

// ============================================================================
// Category configuration (owned versions for API responses)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptionDto {
    pub value: String,
    pub label: Translations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterDefinitionDto {
    Search {
        key: String,
        label: Translations,
    },
    Select {
        key: String,
        label: Translations,
        options: Vec<FilterOptionDto>,
    },
    Range {
        key: String,
        label: Translations,
        min: f64,
        max: f64,
        step: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    MultiSelect {
        key: String,
        label: Translations,
        options: Vec<FilterOptionDto>,
    },
}

impl From<&FilterDefinition> for FilterDefinitionDto {
    fn from(def: &FilterDefinition) -> Self {
        let options = |opts: &[FilterOption]| -> Vec<FilterOptionDto> {
            opts.iter()
                .map(|o| FilterOptionDto {
                    value: o.value.to_string(),
                    label: o.label.to_owned_map(),
                })
                .collect()
        };
        match def {
            FilterDefinition::Search { key, label } => FilterDefinitionDto::Search {
                key: key.to_string(),
                label: label.to_owned_map(),
            },
            FilterDefinition::Select { key, label, options: opts } => FilterDefinitionDto::Select {
                key: key.to_string(),
                label: label.to_owned_map(),
                options: options(opts),
            },
            FilterDefinition::Range { key, label, min, max, step, unit } => {
                FilterDefinitionDto::Range {
                    key: key.to_string(),
                    label: label.to_owned_map(),
                    min: *min,
                    max: *max,
                    step: *step,
                    unit: unit.map(str::to_string),
                }
            }
            FilterDefinition::MultiSelect { key, label, options: opts } => {
                FilterDefinitionDto::MultiSelect {
                    key: key.to_string(),
                    label: label.to_owned_map(),
                    options: options(opts),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortOptionDto {
    pub key: String,
    pub label: Translations,
}

impl From<&SortOption> for SortOptionDto {
    fn from(option: &SortOption) -> Self {
        Self {
            key: option.key.to_string(),
            label: option.label.to_owned_map(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryDto {
    pub key: String,
    pub label: Translations,
    pub description: Translations,
}

impl From<&Subcategory> for SubcategoryDto {
    fn from(sub: &Subcategory) -> Self {
        Self {
            key: sub.key.to_string(),
            label: sub.label.to_owned_map(),
            description: sub.description.to_owned_map(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfigDto {
    pub key: String,
    pub label: Translations,
    pub description: Translations,
    pub filters: Vec<FilterDefinitionDto>,
    pub sort_options: Vec<SortOptionDto>,
    pub subcategories: Vec<SubcategoryDto>,
    pub default_sort: String,
}

impl From<&CategoryConfig> for CategoryConfigDto {
    fn from(config: &CategoryConfig) -> Self {
        Self {
            key: config.key().to_string(),
            label: config.label.to_owned_map(),
            description: config.description.to_owned_map(),
            filters: config.filters.iter().map(Into::into).collect(),
            sort_options: config.sort_options.iter().map(Into::into).collect(),
            subcategories: config.subcategories.iter().map(Into::into).collect(),
            default_sort: config.default_sort.to_string(),
        }
    }
}

// ============================================================================
// Pages, related content, search
// ============================================================================

/// Server-side engine result for `GET /api/catalog/:category`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPageResponse {
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    pub items: Vec<ContentItem>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub links: PaginationLinks,
}

/// Relation type (`same_region`, `popular`, ...) -> items
pub type RelatedContent = BTreeMap<String, Vec<ContentItem>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedContentQuery {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    /// Category key -> matching items
    pub results: BTreeMap<String, Vec<ContentItem>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::catalog::registry::get_category_config;

    #[test]
    fn test_config_dto_tags_filter_types() {
        let dto = CategoryConfigDto::from(get_category_config("cols").unwrap());
        let json = serde_json::to_value(&dto).unwrap();
        let types: Vec<&str> = json["filters"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["type"].as_str().unwrap())
            .collect();
        assert_eq!(
            types,
            vec!["search", "select", "select", "range", "range", "range", "multiSelect"]
        );
        assert_eq!(json["defaultSort"], "featured");
        assert_eq!(json["filters"][3]["unit"], "m");
    }
}
