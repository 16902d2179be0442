// src/llm/mod.rs
//! Text-generation oracle: the trait seam, the Gemini client and retry wrapper

pub mod gemini;
pub mod oracle;
pub mod retry;

pub use gemini::GeminiClient;
pub use oracle::{OracleError, TextGenerator};
pub use retry::{RetryPolicy, RetryingGenerator};

use crate::config::OracleSettings;
use std::sync::Arc;

/// Gemini client wrapped in the configured retry policy
pub fn build_generator(settings: &OracleSettings) -> Result<Arc<dyn TextGenerator>, OracleError> {
    let client = GeminiClient::new(settings)?;
    Ok(Arc::new(RetryingGenerator::new(
        client,
        RetryPolicy::from_settings(settings),
    )))
}
