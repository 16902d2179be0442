// src/types/job.rs
//! Job posting text and the structured fields extracted from it

use serde::{Deserialize, Serialize};

/// Where the posting text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOrigin {
    Url(String),
    Text,
}

/// Plain text recovered from a job posting source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPostingText {
    pub origin: JobOrigin,
    pub body: String,
}

impl JobPostingText {
    pub fn from_url(url: &str, body: String) -> Self {
        Self {
            origin: JobOrigin::Url(url.to_string()),
            body,
        }
    }

    pub fn from_text(body: String) -> Self {
        Self {
            origin: JobOrigin::Text,
            body,
        }
    }

    /// Length in characters, the unit the minimum-content gate is measured in
    pub fn len(&self) -> usize {
        self.body.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_usable(&self, min_chars: usize) -> bool {
        self.len() >= min_chars
    }
}

/// Structured job fields. Field names are the JSON contract with existing callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedJobFields {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub expectations: String,
    #[serde(default)]
    pub qualifications: String,
    #[serde(rename = "fullJD", default)]
    pub full_jd: String,
}

impl ExtractedJobFields {
    /// Title, company and the full description are needed to score a match
    pub fn validate_for_match(&self) -> Result<(), String> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("company", &self.company),
            ("fullJD", &self.full_jd),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("Missing required job fields: {}", missing.join(", ")))
        }
    }

    pub fn display_title(&self) -> String {
        format!("{} @ {}", self.title, self.company)
    }
}

/// Job context for resume suggestions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetJob {
    pub title: String,
    pub company: String,
    pub description: String,
}
