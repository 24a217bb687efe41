use std::io::{Cursor, Read, Write};

use lopdf::Document;
use quick_xml::events::Event;
use quick_xml::Reader;
use tempfile::NamedTempFile;

use crate::error::{AppError, AppResult};
use crate::models::DocumentFormat;

/// Converts raw document bytes into plain text, one logical unit (page or
/// paragraph) per line.
///
/// Extraction never panics on malformed input: a corrupt document comes back
/// as an `ExtractionError`, and a structurally valid document with no text
/// comes back as an empty string so the caller can decide what to do.
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, bytes: &[u8], format: DocumentFormat) -> AppResult<String> {
        match format {
            DocumentFormat::Pdf => self.extract_pdf(bytes),
            DocumentFormat::Docx => self.extract_docx(bytes),
            // Doc/Unknown are rejected at the handler boundary before
            // extraction is ever attempted.
            DocumentFormat::Doc => Err(AppError::DocFormatNotSupported),
            DocumentFormat::Unknown => Err(AppError::UnsupportedFormat),
        }
    }

    /// Extracts PDF text page by page. A page that yields no text contributes
    /// nothing; one broken page never fails the whole document.
    fn extract_pdf(&self, bytes: &[u8]) -> AppResult<String> {
        let per_page = match Document::load_mem(bytes) {
            Ok(doc) => {
                let mut pages = Vec::new();
                for (page_no, _) in doc.get_pages() {
                    match doc.extract_text(&[page_no]) {
                        Ok(text) => {
                            let text = text.trim();
                            if !text.is_empty() {
                                pages.push(text.to_string());
                            }
                        }
                        Err(e) => {
                            tracing::debug!(page = page_no, "Skipping page with no extractable text: {}", e);
                        }
                    }
                }
                Some(pages.join("\n"))
            }
            Err(e) => {
                tracing::warn!("PDF structure parsing failed: {}, trying whole-document extraction", e);
                None
            }
        };

        match per_page {
            Some(text) if !text.trim().is_empty() => Ok(text),
            Some(_) => {
                // Valid document, no per-page text. Try the whole-document
                // extractor before concluding the PDF is textless.
                Ok(self.extract_pdf_whole(bytes).unwrap_or_default())
            }
            None => self.extract_pdf_whole(bytes).map_err(|e| {
                AppError::extraction(format!("Failed to read PDF: {}", e))
            }),
        }
    }

    /// Whole-document fallback via pdf-extract, which wants a file path. The
    /// bytes are staged in a uniquely named temp file that is removed on drop
    /// on every exit path, including panics.
    fn extract_pdf_whole(&self, bytes: &[u8]) -> anyhow::Result<String> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(bytes)?;
        let text = pdf_extract::extract_text(temp_file.path())
            .map_err(|e| anyhow::anyhow!("pdf-extract failed: {}", e))?;
        Ok(text.trim().to_string())
    }

    /// Extracts DOCX text by reading `word/document.xml` out of the ZIP
    /// container and collecting the `<w:t>` runs of each `<w:p>` paragraph.
    fn extract_docx(&self, bytes: &[u8]) -> AppResult<String> {
        let cursor = Cursor::new(bytes);
        let mut archive = zip::ZipArchive::new(cursor)
            .map_err(|e| AppError::extraction(format!("Failed to open DOCX container: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| AppError::extraction(format!("DOCX is missing word/document.xml: {}", e)))?
            .read_to_string(&mut xml)
            .map_err(|e| AppError::extraction(format!("Failed to read DOCX body: {}", e)))?;

        let mut reader = Reader::from_str(&xml);
        let mut paragraphs: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => {
                    in_text_run = true;
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"p" => {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    _ => {}
                },
                Ok(Event::Text(t)) if in_text_run => {
                    let text = t
                        .unescape()
                        .map_err(|e| AppError::extraction(format!("Invalid DOCX text encoding: {}", e)))?;
                    current.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(AppError::extraction(format!("Malformed DOCX XML: {}", e)));
                }
                _ => {}
            }
        }

        Ok(paragraphs.join("\n"))
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}
