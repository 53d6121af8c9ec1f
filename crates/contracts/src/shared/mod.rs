pub mod catalog;
pub mod identity;
pub mod localized;
