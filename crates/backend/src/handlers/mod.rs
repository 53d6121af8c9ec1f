pub mod catalog;
pub mod cols;
pub mod search;
