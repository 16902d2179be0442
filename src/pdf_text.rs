// src/pdf_text.rs
//! Resume PDF text extraction and cleanup of common decoder artifacts

use crate::error::{PipelineError, PipelineResult};
use crate::types::ResumeText;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Cleaned text must be longer than this to count as a resume
pub const MIN_RESUME_CHARS: usize = 50;

struct Patterns {
    excess_newlines: Regex,
    horizontal_runs: Regex,
    page_number_lines: Regex,
    symbol_only_lines: Regex,
    blank_line_runs: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        excess_newlines: Regex::new(r"\n{3,}").expect("valid pattern"),
        horizontal_runs: Regex::new(r"[ \t]{2,}").expect("valid pattern"),
        page_number_lines: Regex::new(r"(?m)^\d+\s*$").expect("valid pattern"),
        symbol_only_lines: Regex::new(r"(?m)^[^\w\n]*$").expect("valid pattern"),
        blank_line_runs: Regex::new(r"\n\s*\n").expect("valid pattern"),
    })
}

/// Normalize raw decoder output.
///
/// Line endings become `\n`, paragraph breaks are kept at one blank line,
/// horizontal runs collapse to a space, and lines holding only a page number
/// or only separator characters are dropped.
pub fn clean_pdf_text(raw: &str) -> String {
    let p = patterns();

    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let text = p.excess_newlines.replace_all(&text, "\n\n");
    let text = p.horizontal_runs.replace_all(&text, " ");
    let text = text.trim();

    let text = p.page_number_lines.replace_all(text, "");
    let text = p.symbol_only_lines.replace_all(&text, "");
    let text = p.blank_line_runs.replace_all(&text, "\n\n");

    text.trim().to_string()
}

/// Decode every page of `bytes` and clean the result
pub fn extract_resume_text(bytes: &[u8]) -> PipelineResult<ResumeText> {
    debug!("PDF buffer received: {} bytes", bytes.len());

    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PipelineError::UnreadablePdf(e.to_string()))?;

    resume_from_raw(&raw)
}

/// Clean decoder output and apply the minimum-length gate
pub fn resume_from_raw(raw: &str) -> PipelineResult<ResumeText> {
    let text = clean_pdf_text(raw);
    let chars = text.chars().count();
    debug!("Extracted text length: {}", chars);

    if chars <= MIN_RESUME_CHARS {
        return Err(PipelineError::NoExtractableContent(format!(
            "only {} characters of text extracted from PDF",
            chars
        )));
    }

    Ok(ResumeText::new(text))
}

/// Runs the decoder on the blocking pool; a decoder panic becomes `UnreadablePdf`
pub async fn extract_resume_text_async(bytes: Vec<u8>) -> PipelineResult<ResumeText> {
    tokio::task::spawn_blocking(move || extract_resume_text(&bytes))
        .await
        .map_err(|e| {
            warn!("PDF decoder aborted: {}", e);
            PipelineError::UnreadablePdf("PDF decoder aborted".to_string())
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_page_numbers_and_blank_runs() {
        let raw = "   \n\n\n14\n\nJohn Doe\nSoftware Engineer\n\n\n";
        assert_eq!(clean_pdf_text(raw), "John Doe\nSoftware Engineer");
    }

    #[test]
    fn page_number_lines_are_removed_entirely() {
        let cleaned = clean_pdf_text("Experience\n14\nAcme Corp");
        assert!(!cleaned.lines().any(|line| line.trim() == "14"));
        assert!(cleaned.starts_with("Experience"));
        assert!(cleaned.ends_with("Acme Corp"));
    }

    #[test]
    fn drops_separator_lines_and_keeps_paragraphs() {
        let raw = "Skills\r\n------\r\nRust  Go\t\tSQL\r\n\r\n\r\n\r\n• • •\nEducation";
        assert_eq!(clean_pdf_text(raw), "Skills\n\nRust Go SQL\n\nEducation");
    }

    #[test]
    fn keeps_numbers_inside_text() {
        let cleaned = clean_pdf_text("Led a team of 12 engineers\n2019 - 2023");
        assert_eq!(cleaned, "Led a team of 12 engineers\n2019 - 2023");
    }

    /// Single-page PDF with one Helvetica text line per entry
    fn text_pdf(lines: &[&str]) -> Vec<u8> {
        let mut content = String::from("BT\n/F1 12 Tf\n14 TL\n72 720 Td\n");
        for line in lines {
            content.push_str(&format!("({}) Tj T*\n", line));
        }
        content.push_str("ET");

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
        ];

        let mut pdf = String::from("%PDF-1.4\n");
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
        }

        let xref_start = pdf.len();
        pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            pdf.push_str(&format!("{:010} 00000 n \n", offset));
        }
        pdf.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        ));
        pdf.into_bytes()
    }

    #[test]
    fn decodes_text_pdf_into_resume() {
        let pdf = text_pdf(&[
            "Jordan Park",
            "Senior Backend Engineer",
            "Seven years building payment services in Rust and Go",
        ]);

        let resume = extract_resume_text(&pdf).unwrap();
        assert!(resume.text.contains("Jordan Park"));
        assert!(resume.text.contains("Rust"));
        assert!(resume.text.chars().count() > MIN_RESUME_CHARS);
        assert_eq!(resume.length, resume.text.len());
    }

    #[test]
    fn short_text_pdf_has_no_extractable_content() {
        let pdf = text_pdf(&["Jordan Park", "Engineer"]);
        let err = extract_resume_text(&pdf).unwrap_err();
        assert!(matches!(err, PipelineError::NoExtractableContent(_)));
    }

    #[test]
    fn gate_requires_more_than_fifty_characters() {
        let fifty = "a".repeat(MIN_RESUME_CHARS);
        assert!(matches!(
            resume_from_raw(&fifty),
            Err(PipelineError::NoExtractableContent(_))
        ));

        let resume = resume_from_raw(&format!("{}b", fifty)).unwrap();
        assert_eq!(resume.length, MIN_RESUME_CHARS + 1);
    }

    #[test]
    fn gate_counts_cleaned_text() {
        // Page numbers and blank runs do not count towards the minimum
        let raw = format!("\n\n\n14\n\n{}\n\n\n", "x".repeat(MIN_RESUME_CHARS));
        assert!(resume_from_raw(&raw).is_err());
    }

    #[test]
    fn gate_measures_characters_and_reports_bytes() {
        let text = "é".repeat(MIN_RESUME_CHARS + 1);
        let resume = resume_from_raw(&text).unwrap();
        assert_eq!(resume.length, text.len());
    }

    #[test]
    fn rejects_non_pdf_bytes() {
        let err = extract_resume_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PipelineError::UnreadablePdf(_)));
    }

    #[tokio::test]
    async fn async_extraction_reports_unreadable_input() {
        let err = extract_resume_text_async(b"plain text, no header".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnreadablePdf(_)));
    }
}
