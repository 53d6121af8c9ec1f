pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod related;
pub mod service;
pub mod source;
