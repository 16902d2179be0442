// src/extraction/content_locator.rs
//! Finds the part of a job page that holds the posting body.
//!
//! Selectors are tried from most to least specific and the first match with
//! enough text wins. If none qualifies, `<main>` (or `<body>`) is used.

use crate::error::{PipelineError, PipelineResult};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Minimum characters a located posting must have
pub const MIN_JOB_CHARS: usize = 100;

/// Subtrees whose text never counts as posting content
const NOISE_TAGS: [&str; 4] = ["script", "style", "noscript", "iframe"];

/// Precision-first: schema.org microdata, then known class/id names, then generic containers
pub const JOB_SELECTORS: [&str; 13] = [
    r#"[itemtype="http://schema.org/JobPosting"] [itemprop="description"]"#,
    r#"[itemtype*="JobPosting"] [itemprop*="description"]"#,
    ".job-description",
    ".job_content",
    ".job-posting",
    ".posting-body",
    ".description-content",
    "article.job",
    "section.job-details",
    "section.job-description",
    r#"div[id*="job"]"#,
    r#"div[class*="job"]"#,
    r#"article[role="main"]"#,
];

struct LocatorRule {
    source: &'static str,
    selector: Selector,
    /// Cleaned text must be strictly longer than this
    min_chars: usize,
}

pub struct ContentLocator {
    rules: Vec<LocatorRule>,
    main: Option<Selector>,
    body: Option<Selector>,
}

impl Default for ContentLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentLocator {
    pub fn new() -> Self {
        let rules = JOB_SELECTORS
            .iter()
            .filter_map(|source| match Selector::parse(source) {
                Ok(selector) => Some(LocatorRule {
                    source,
                    selector,
                    min_chars: MIN_JOB_CHARS,
                }),
                Err(e) => {
                    warn!("Skipping invalid job selector {}: {:?}", source, e);
                    None
                }
            })
            .collect();

        Self {
            rules,
            main: Selector::parse("main").ok(),
            body: Selector::parse("body").ok(),
        }
    }

    /// Located, cleaned posting text, or `NoExtractableContent`
    pub fn locate(&self, html: &str) -> PipelineResult<String> {
        let document = Html::parse_document(html);

        if let Some(text) = self.match_rules(&document) {
            return Ok(text);
        }

        warn!("No job selector matched, falling back to page body");
        let text = self.fallback_text(&document);
        let chars = text.chars().count();

        if chars < MIN_JOB_CHARS {
            return Err(PipelineError::NoExtractableContent(format!(
                "only {} characters of text found on page (need {})",
                chars, MIN_JOB_CHARS
            )));
        }

        Ok(text)
    }

    fn match_rules(&self, document: &Html) -> Option<String> {
        for rule in &self.rules {
            if let Some(element) = document.select(&rule.selector).next() {
                let text = normalize_whitespace(&visible_text(element));
                if text.chars().count() > rule.min_chars {
                    debug!("Job content located with selector {}", rule.source);
                    return Some(text);
                }
            }
        }
        None
    }

    fn fallback_text(&self, document: &Html) -> String {
        let container = self
            .main
            .as_ref()
            .and_then(|selector| document.select(selector).next())
            .or_else(|| {
                self.body
                    .as_ref()
                    .and_then(|selector| document.select(selector).next())
            });

        container
            .map(|element| normalize_whitespace(&visible_text(element)))
            .unwrap_or_default()
    }
}

/// Text of `element`, skipping script/style/noscript/iframe subtrees
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    let mut stack: Vec<_> = element.children().collect();
    stack.reverse();

    while let Some(node) = stack.pop() {
        if let Some(text) = node.value().as_text() {
            out.push_str(text);
        } else if let Some(el) = node.value().as_element() {
            if NOISE_TAGS.contains(&el.name()) {
                continue;
            }
            let start = stack.len();
            stack.extend(node.children());
            stack[start..].reverse();
        }
    }

    out
}

/// Collapse whitespace runs to one space, blank-line runs to one blank line, then trim
pub fn normalize_whitespace(text: &str) -> String {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    static BLANK_LINES: OnceLock<Regex> = OnceLock::new();

    let runs = RUNS.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));
    let blank_lines = BLANK_LINES
        .get_or_init(|| Regex::new(r"\n\s*\n").expect("blank line pattern is valid"));

    let collapsed = runs.replace_all(text, " ");
    let collapsed = blank_lines.replace_all(&collapsed, "\n\n");
    collapsed.trim().to_string()
}
