// src/extraction/page_fetcher.rs
use crate::config::LimitSettings;
use crate::error::{PipelineError, PipelineResult};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{info, warn};

/// Only absolute http(s) links are fetched
pub fn validate_job_url(url: &str) -> PipelineResult<Url> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| PipelineError::InvalidInput(format!("Invalid job link '{}': {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(PipelineError::InvalidInput(format!(
            "Unsupported link scheme '{}', expected http or https",
            scheme
        ))),
    }
}

pub struct PageFetcher {
    client: Client,
    max_bytes: usize,
}

impl PageFetcher {
    pub fn new(limits: &LimitSettings) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(limits.user_agent.clone())
            .timeout(Duration::from_secs(limits.fetch_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            max_bytes: limits.max_page_bytes,
        })
    }

    /// GET the page; non-2xx, network errors and oversized bodies are `FetchFailed`
    pub async fn fetch(&self, url: &Url) -> PipelineResult<String> {
        info!("Fetching job post: {}", url);

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| PipelineError::FetchFailed(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::FetchFailed(format!(
                "{} answered with HTTP {}",
                url, status
            )));
        }

        if let Some(declared) = response.content_length() {
            if declared as usize > self.max_bytes {
                return Err(self.too_large(url));
            }
        }

        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| PipelineError::FetchFailed(format!("reading {} failed: {}", url, e)))?
        {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(self.too_large(url));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn too_large(&self, url: &Url) -> PipelineError {
        warn!("Job page {} exceeds {} bytes", url, self.max_bytes);
        PipelineError::FetchFailed(format!(
            "page at {} is larger than {} bytes",
            url, self.max_bytes
        ))
    }
}
