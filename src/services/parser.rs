//! Parsing of the raw provider text into a validated `AnalysisResult`.
//!
//! Models habitually wrap JSON in markdown code fences; the parser undoes
//! exactly that (one leading fence marker, one trailing) without assuming
//! fences are always present, then requires strict JSON and a schema match.

use serde_json::Value;
use thiserror::Error;

use crate::models::AnalysisResult;
use crate::services::normalizer;

#[derive(Debug, Error)]
pub enum ParseError {
    // The raw text rides along for server-side diagnostics; it is never
    // exposed to the end caller.
    #[error("provider response was not valid JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("provider response did not match the feedback schema")]
    Schema { raw: String },
}

impl ParseError {
    pub fn raw(&self) -> &str {
        match self {
            ParseError::Json { raw, .. } => raw,
            ParseError::Schema { raw } => raw,
        }
    }
}

/// Strips one leading ```` ```json ```` (or bare ```` ``` ````) marker and
/// one trailing ```` ``` ```` marker, if present.
pub fn strip_code_fence(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parses raw provider output into the canonical dual-persona result.
pub fn parse(raw_text: &str) -> Result<AnalysisResult, ParseError> {
    let cleaned = strip_code_fence(raw_text);

    let value: Value = serde_json::from_str(cleaned).map_err(|source| ParseError::Json {
        source,
        raw: raw_text.to_string(),
    })?;

    if !normalizer::validate(&value) {
        return Err(ParseError::Schema {
            raw: raw_text.to_string(),
        });
    }

    serde_json::from_value(value).map_err(|_| ParseError::Schema {
        raw: raw_text.to_string(),
    })
}
