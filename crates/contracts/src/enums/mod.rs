pub mod category_kind;
pub mod language;

pub use category_kind::CategoryKind;
pub use language::Language;
