// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; JobBot/1.0; +https://example.com/bot)";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub oracle: OracleSettings,
    pub limits: LimitSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OracleSettings {
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    pub max_page_bytes: usize,
    pub max_pdf_bytes: usize,
    pub fetch_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
            api_key: None,
            timeout_seconds: 60,
            max_attempts: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_page_bytes: 5 * 1024 * 1024,
            max_pdf_bytes: 10 * 1024 * 1024,
            fetch_timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: Option<AppConfig>,
    production: Option<AppConfig>,
}

impl AppConfig {
    /// Read `path` if it exists, select the environment section, then apply overrides
    pub fn load_from(path: &Path, environment: &str) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::from_yaml_str(&content, environment)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            info!("{} not found, using default configuration", path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content)?;

        match environment {
            "production" => file
                .production
                .context("Configuration has no production section"),
            _ => Ok(file.local.unwrap_or_default()),
        }
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.oracle.api_key = Some(key);
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.oracle.model = model;
        }
        if let Some(url) = lookup("GEMINI_BASE_URL") {
            self.oracle.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(port) = lookup("JOBFIT_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }
}
