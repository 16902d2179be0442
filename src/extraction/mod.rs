// src/extraction/mod.rs
pub mod content_locator;
pub mod field_extractor;
pub mod page_fetcher;

pub use content_locator::{normalize_whitespace, ContentLocator, MIN_JOB_CHARS};
pub use field_extractor::FieldExtractor;
pub use page_fetcher::{validate_job_url, PageFetcher};
