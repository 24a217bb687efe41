use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{AnalysisMode, AnalysisResult, DocumentFormat, UploadedDocument};
use crate::services::extractor::TextExtractor;
use crate::services::gemini::TextGenerator;
use crate::services::normalizer;
use crate::services::parser;
use crate::services::prompt::PromptBuilder;

/// The full pipeline: extract, prompt, call, parse, normalize, fall back.
///
/// Input problems (bad format, empty file, unreadable document) are the
/// caller's errors and surface as such. Provider and parse problems are not:
/// once a readable resume reached the provider step, the analyzer always
/// returns a well-formed result, substituting the fixed fallback when the
/// provider misbehaves. Holds no per-request state.
pub struct ResumeAnalyzer {
    extractor: TextExtractor,
    prompt_builder: PromptBuilder,
    generator: Arc<dyn TextGenerator>,
}

impl ResumeAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            extractor: TextExtractor::new(),
            prompt_builder: PromptBuilder::new(),
            generator,
        }
    }

    /// Analyzes an uploaded document end to end.
    pub async fn analyze_document(
        &self,
        document: &UploadedDocument,
        mode: AnalysisMode,
        user_description: Option<&str>,
    ) -> AppResult<AnalysisResult> {
        match document.format {
            DocumentFormat::Doc => return Err(AppError::DocFormatNotSupported),
            DocumentFormat::Unknown => return Err(AppError::UnsupportedFormat),
            DocumentFormat::Pdf | DocumentFormat::Docx => {}
        }
        if document.content.is_empty() {
            return Err(AppError::EmptyFile);
        }

        let text = match self.extractor.extract(&document.content, document.format) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %document.name, "Extraction failed: {}", e);
                return Err(AppError::UnreadableDocument);
            }
        };

        info!(
            file = %document.name,
            bytes = document.size,
            chars = text.len(),
            "Extracted resume text"
        );

        self.analyze_text(&text, mode, user_description).await
    }

    /// Analyzes already-extracted resume text.
    ///
    /// Empty text is rejected before the provider is ever called; after
    /// that, the result is infallibly well-formed.
    pub async fn analyze_text(
        &self,
        resume_text: &str,
        mode: AnalysisMode,
        user_description: Option<&str>,
    ) -> AppResult<AnalysisResult> {
        if resume_text.trim().is_empty() {
            return Err(AppError::UnreadableDocument);
        }

        let spec = self.prompt_builder.build(resume_text, mode, user_description);

        let raw = match self.generator.generate(&spec.prompt, &spec.generation).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Provider call failed, serving fallback feedback: {}", e);
                return Ok(normalizer::fallback());
            }
        };

        match parser::parse(&raw) {
            Ok(result) => Ok(result),
            Err(e) => {
                // The remap handles the alternate flat schema some prompt
                // revisions produce; everything else lands on the fallback.
                if let Ok(value) = serde_json::from_str(parser::strip_code_fence(&raw)) {
                    if let Some(result) = normalizer::normalize(value) {
                        warn!("Provider used the alternate schema, remapped to canonical");
                        return Ok(result);
                    }
                }
                warn!(raw = %e.raw(), "Unusable provider response, serving fallback feedback: {}", e);
                Ok(normalizer::fallback())
            }
        }
    }
}
