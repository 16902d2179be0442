// src/llm/retry.rs
use super::oracle::{OracleError, TextGenerator};
use crate::config::OracleSettings;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_settings(settings: &OracleSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_backoff: Duration::from_millis(settings.retry_backoff_ms),
        }
    }
}

/// Retries transient oracle failures with exponential backoff
pub struct RetryingGenerator<G> {
    inner: G,
    policy: RetryPolicy,
}

impl<G: TextGenerator> RetryingGenerator<G> {
    pub fn new(inner: G, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for RetryingGenerator<G> {
    async fn generate(&self, prompt: &str) -> Result<String, OracleError> {
        let mut attempt = 0;
        let mut backoff = self.policy.initial_backoff;

        loop {
            attempt += 1;
            match self.inner.generate(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.policy.max_attempts => {
                    warn!(
                        "Transient oracle failure (attempt {}/{}): {}",
                        attempt, self.policy.max_attempts, e
                    );
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::ScriptedGenerator;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn retries_until_success() {
        let inner = ScriptedGenerator::new(vec![
            Err(OracleError::RateLimited),
            Err(OracleError::Api {
                status: 503,
                body: "busy".into(),
            }),
            Ok("done".to_string()),
        ]);
        let generator = RetryingGenerator::new(inner, policy(3));

        assert_eq!(generator.generate("p").await.unwrap(), "done");
        assert_eq!(generator.inner.calls(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let inner = ScriptedGenerator::new(vec![
            Err(OracleError::RateLimited),
            Err(OracleError::RateLimited),
            Ok("too late".to_string()),
        ]);
        let generator = RetryingGenerator::new(inner, policy(2));

        assert!(matches!(
            generator.generate("p").await,
            Err(OracleError::RateLimited)
        ));
        assert_eq!(generator.inner.calls(), 2);
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let inner = ScriptedGenerator::new(vec![
            Err(OracleError::Api {
                status: 400,
                body: "bad".into(),
            }),
            Ok("unused".to_string()),
        ]);
        let generator = RetryingGenerator::new(inner, policy(5));

        assert!(generator.generate("p").await.is_err());
        assert_eq!(generator.inner.calls(), 1);
    }
}
