// src/llm/oracle.rs
use async_trait::async_trait;

#[derive(thiserror::Error, Debug)]
pub enum OracleError {
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// The request URL is dropped so nothing about the endpoint reaches the logs
impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

impl OracleError {
    /// Whether a retry has a chance of succeeding
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited => true,
            Self::Api { status, .. } => *status >= 500,
            Self::EmptyResponse | Self::Config(_) => false,
        }
    }
}

/// Text-generation service: prompt in, free-form text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, OracleError>;

    fn model_name(&self) -> &str;
}
