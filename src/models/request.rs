use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Document formats recognized at the upload boundary, detected from the
/// filename extension. `Doc` is kept as its own variant so the legacy binary
/// format can be rejected with a dedicated message instead of the generic
/// "unsupported" one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    Unknown,
}

impl DocumentFormat {
    pub fn from_filename(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if lower.ends_with(".docx") {
            DocumentFormat::Docx
        } else if lower.ends_with(".doc") {
            DocumentFormat::Doc
        } else {
            DocumentFormat::Unknown
        }
    }
}

/// An uploaded resume file, alive only for the duration of one request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub name: String,
    pub size: usize,
    pub content: Vec<u8>,
    pub format: DocumentFormat,
}

impl UploadedDocument {
    pub fn new(name: String, content: Vec<u8>) -> Self {
        let size = content.len();
        let format = DocumentFormat::from_filename(&name);
        Self {
            name,
            size,
            content,
            format,
        }
    }
}

/// Which feedback tone the caller asked for.
///
/// The canonical response always carries both personas; the mode is still
/// validated so that a typo'd value fails loudly instead of being silently
/// treated as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Genuine,
    Roast,
    #[default]
    Both,
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "genuine" => Ok(AnalysisMode::Genuine),
            "roast" => Ok(AnalysisMode::Roast),
            "both" => Ok(AnalysisMode::Both),
            other => Err(other.to_string()),
        }
    }
}

/// JSON body variant of the analyze endpoint: raw resume text instead of a
/// file upload.
#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume: String,
    pub mode: Option<String>,
    pub user_description: Option<String>,
}
