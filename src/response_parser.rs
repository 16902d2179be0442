// src/response_parser.rs
//! Pulls a JSON payload out of free-form model output.
//!
//! Models wrap their JSON in prose or in a ```json fence. A labelled fence is
//! the stronger signal, so it is checked first; otherwise the widest
//! `{...}` (or `[...]`) span in the text is taken.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

#[derive(thiserror::Error, Debug)]
pub enum ResponseParseError {
    #[error("no JSON payload found in model response")]
    NoJsonFound,

    #[error("invalid JSON in model response: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn name(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }

    fn span_regex(self) -> &'static Regex {
        static OBJECT: OnceLock<Regex> = OnceLock::new();
        static ARRAY: OnceLock<Regex> = OnceLock::new();
        match self {
            Self::Object => OBJECT
                .get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("object span pattern is valid")),
            Self::Array => ARRAY
                .get_or_init(|| Regex::new(r"(?s)\[.*\]").expect("array span pattern is valid")),
        }
    }
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?is)```json(.*?)```").expect("fence pattern is valid"))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn fenced_json(raw: &str) -> Option<&str> {
    fence_regex()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|inner| !inner.is_empty())
}

fn span_json(raw: &str, shape: JsonShape) -> Option<&str> {
    shape.span_regex().find(raw).map(|m| m.as_str())
}

fn parse_shaped(candidate: &str, shape: JsonShape) -> Result<Value, ResponseParseError> {
    let value: Value = serde_json::from_str(candidate)?;
    if !shape.matches(&value) {
        return Err(ResponseParseError::UnexpectedShape {
            expected: shape.name(),
            found: kind_of(&value),
        });
    }
    Ok(value)
}

/// Extract and parse the JSON payload, checking its top-level shape.
///
/// A fence holding the wrong shape (an object wrapping the wanted array, say)
/// falls back to the span search; the shape error stands if that finds nothing.
pub fn extract_json(raw: &str, shape: JsonShape) -> Result<Value, ResponseParseError> {
    if let Some(fenced) = fenced_json(raw) {
        return match parse_shaped(fenced, shape) {
            Err(shape_err @ ResponseParseError::UnexpectedShape { .. }) => {
                match span_json(raw, shape) {
                    Some(candidate) => parse_shaped(candidate, shape),
                    None => Err(shape_err),
                }
            }
            other => other,
        };
    }

    let candidate = span_json(raw, shape).ok_or(ResponseParseError::NoJsonFound)?;
    parse_shaped(candidate, shape)
}

/// Extract the payload and deserialize it into `T`.
pub fn parse_response<T: DeserializeOwned>(
    raw: &str,
    shape: JsonShape,
) -> Result<T, ResponseParseError> {
    let value = extract_json(raw, shape)?;
    Ok(serde_json::from_value(value)?)
}
