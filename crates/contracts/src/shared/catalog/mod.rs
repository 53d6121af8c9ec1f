//! Category browsing pipeline: registry, filter state, the
//! filter/sort/paginate engine and the URL synchronizer.

pub mod dto;
pub mod engine;
pub mod filter;
pub mod pagination;
pub mod registry;
pub mod sort;
pub mod url_sync;
pub mod view_state;

pub use engine::{run_pipeline, PageResult, PAGE_SIZE};
pub use filter::{ActiveFilters, FilterDefinition, FilterOption, FilterValue};
pub use registry::{all_categories, get_category_config, CategoryConfig, SortOption, Subcategory};
pub use sort::SortKey;
pub use view_state::ViewState;
