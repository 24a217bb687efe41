//! End-to-end pipeline tests with fake providers
//!
//! Every scenario drives the real orchestrator (extraction, prompt build,
//! parse, normalize, fallback) against an in-process `TextGenerator`, so no
//! network or API key is needed.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use resume_roaster::error::AppError;
use resume_roaster::models::{AnalysisMode, UploadedDocument};
use resume_roaster::services::normalizer;
use resume_roaster::services::{GenerationConfig, ProviderError, ResumeAnalyzer, TextGenerator};

/// Provider double that replies with a canned string.
struct StaticGenerator {
    reply: String,
}

impl StaticGenerator {
    fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _generation: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        Ok(self.reply.clone())
    }
}

/// Provider double that always fails at the transport level.
struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _generation: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Api {
            status: 503,
            message: "upstream unavailable".to_string(),
        })
    }
}

fn analyzer_with(generator: impl TextGenerator + 'static) -> ResumeAnalyzer {
    ResumeAnalyzer::new(Arc::new(generator))
}

fn valid_dual_persona_json() -> String {
    serde_json::to_string(&normalizer::fallback()).unwrap()
}

fn sample_docx() -> Vec<u8> {
    let xml = r#"<?xml version="1.0"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
          <w:body>
            <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
            <w:p><w:r><w:t>Ten years of Rust experience</w:t></w:r></w:p>
          </w:body>
        </w:document>"#;

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn sample_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal("Jane Doe Rust Engineer")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[tokio::test]
async fn fenced_provider_json_is_returned_unchanged() {
    let expected = normalizer::fallback();
    let fenced = format!("```json\n{}\n```", valid_dual_persona_json());
    let analyzer = analyzer_with(StaticGenerator::new(fenced));

    let result = analyzer
        .analyze_text("some resume text", AnalysisMode::Both, None)
        .await
        .unwrap();

    assert_eq!(result, expected);
}

#[tokio::test]
async fn provider_transport_error_yields_the_fallback_not_an_error() {
    let analyzer = analyzer_with(FailingGenerator);

    let result = analyzer
        .analyze_text("some resume text", AnalysisMode::Both, None)
        .await
        .unwrap();

    assert_eq!(result, normalizer::fallback());
}

#[tokio::test]
async fn response_missing_a_persona_yields_the_fallback() {
    let mut value: serde_json::Value = serde_json::from_str(&valid_dual_persona_json()).unwrap();
    value.as_object_mut().unwrap().remove("roast");
    let analyzer = analyzer_with(StaticGenerator::new(value.to_string()));

    let result = analyzer
        .analyze_text("some resume text", AnalysisMode::Both, None)
        .await
        .unwrap();

    assert_eq!(result, normalizer::fallback());
}

#[tokio::test]
async fn unparsable_response_yields_the_fallback() {
    let analyzer = analyzer_with(StaticGenerator::new("I refuse to answer in JSON."));

    let result = analyzer
        .analyze_text("some resume text", AnalysisMode::Both, None)
        .await
        .unwrap();

    assert_eq!(result, normalizer::fallback());
}

#[tokio::test]
async fn alternate_schema_response_is_remapped() {
    let alternate = r#"{
        "overall_review": "Fine resume",
        "categories": [
            {"score": 9, "improvements": ["Crisp headings"], "issues": ["Dense paragraphs"]},
            {"score": 7, "improvements": ["Concrete projects"], "issues": ["No outcomes"]},
            {"score": 6, "improvements": ["Relevant stack"], "issues": ["Skill soup"]},
            {"score": 8, "improvements": ["Plain formatting"], "issues": ["Missing keywords"]}
        ]
    }"#;
    let analyzer = analyzer_with(StaticGenerator::new(alternate));

    let result = analyzer
        .analyze_text("some resume text", AnalysisMode::Both, None)
        .await
        .unwrap();

    assert_eq!(result.genuine.format.score, 9.0);
    assert_eq!(result.genuine.format.good_point, "Crisp headings");
    assert_eq!(result.genuine.content_quality.improvement_area, "No outcomes");
    assert_eq!(result.roast, normalizer::fallback().roast);
}

#[tokio::test]
async fn doc_upload_is_rejected_with_a_dedicated_message() {
    let analyzer = analyzer_with(StaticGenerator::new(valid_dual_persona_json()));
    let document = UploadedDocument::new("legacy.doc".to_string(), vec![0xd0, 0xcf, 0x11, 0xe0]);

    let err = analyzer
        .analyze_document(&document, AnalysisMode::Both, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DocFormatNotSupported));
    assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(
        err.to_string(),
        "DOC format is not supported. Please convert to DOCX or PDF."
    );
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let analyzer = analyzer_with(StaticGenerator::new(valid_dual_persona_json()));
    let document = UploadedDocument::new("resume.pdf".to_string(), Vec::new());

    let err = analyzer
        .analyze_document(&document, AnalysisMode::Both, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EmptyFile));
    assert_eq!(err.to_string(), "Empty file uploaded");
}

#[tokio::test]
async fn unknown_extension_is_rejected() {
    let analyzer = analyzer_with(StaticGenerator::new(valid_dual_persona_json()));
    let document = UploadedDocument::new("resume.txt".to_string(), b"plain text".to_vec());

    let err = analyzer
        .analyze_document(&document, AnalysisMode::Both, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UnsupportedFormat));
}

#[tokio::test]
async fn whitespace_only_text_never_reaches_the_provider() {
    let analyzer = analyzer_with(FailingGenerator);

    let err = analyzer
        .analyze_text("   \n\t  ", AnalysisMode::Both, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UnreadableDocument));
}

#[tokio::test]
async fn docx_upload_runs_the_whole_pipeline() {
    let analyzer = analyzer_with(StaticGenerator::new(valid_dual_persona_json()));
    let document = UploadedDocument::new("resume.docx".to_string(), sample_docx());

    let result = analyzer
        .analyze_document(&document, AnalysisMode::Both, Some("Backend engineer"))
        .await
        .unwrap();

    assert_eq!(result, normalizer::fallback());
}

#[tokio::test]
async fn pdf_upload_runs_the_whole_pipeline() {
    let analyzer = analyzer_with(StaticGenerator::new(valid_dual_persona_json()));
    let document = UploadedDocument::new("resume.pdf".to_string(), sample_pdf());

    let result = analyzer
        .analyze_document(&document, AnalysisMode::Genuine, None)
        .await
        .unwrap();

    assert_eq!(result, normalizer::fallback());
}

#[tokio::test]
async fn garbage_pdf_bytes_are_an_unreadable_document() {
    let analyzer = analyzer_with(StaticGenerator::new(valid_dual_persona_json()));
    let document = UploadedDocument::new("resume.pdf".to_string(), b"not a pdf at all".to_vec());

    let err = analyzer
        .analyze_document(&document, AnalysisMode::Both, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::UnreadableDocument));
    assert_eq!(
        err.to_string(),
        "Could not extract text from the provided file"
    );
}
