// src/types/resume.rs
use serde::Serialize;

/// Normalized resume text, created once per uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeText {
    pub text: String,
    /// Byte length of `text`
    pub length: usize,
}

impl ResumeText {
    pub fn new(text: String) -> Self {
        let length = text.len();
        Self { text, length }
    }
}
