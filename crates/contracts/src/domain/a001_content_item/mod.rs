pub mod aggregate;

pub use aggregate::{AttributeValue, ContentItem, Coordinates, FieldValue};
