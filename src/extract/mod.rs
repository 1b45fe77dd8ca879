//! Text extraction: turns an uploaded PDF/DOCX into plain text with
//! paragraph breaks preserved, a section map, and a metadata side channel
//! used by the format analyzer.

pub mod docx;
pub mod pdf;
pub mod sections;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{MediaType, ResumeDocument};
pub use sections::{SectionKind, SectionSpan};

/// What the extractor learned about the document beyond its text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub page_count: Option<usize>,
    pub embedded_images: usize,
    pub has_tables: bool,
    pub file_size_bytes: usize,
}

/// Plain-text form of a resume plus the offset-to-section map.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub sections: Vec<SectionSpan>,
    pub metadata: ExtractionMetadata,
}

impl ExtractedText {
    pub fn new(text: String, metadata: ExtractionMetadata) -> Self {
        let sections = sections::segment(&text);
        Self {
            text,
            sections,
            metadata,
        }
    }

    /// Build from already-plain text; used by analyzers' tests and anywhere
    /// no original document exists.
    pub fn from_plain(text: &str) -> Self {
        Self::new(text.to_string(), ExtractionMetadata::default())
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.sections.iter().any(|s| s.kind == kind)
    }

    pub fn section_text(&self, kind: SectionKind) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| &self.text[s.start..s.end])
    }

    pub fn section_for_offset(&self, offset: usize) -> Option<&SectionSpan> {
        self.sections
            .iter()
            .find(|s| s.start <= offset && offset < s.end)
    }
}

pub struct TextExtractor {
    max_file_size_bytes: usize,
}

impl TextExtractor {
    pub fn new(max_file_size_bytes: usize) -> Self {
        Self {
            max_file_size_bytes,
        }
    }

    /// Extract plain text from the document. The upload boundary has already
    /// rejected bad media types and oversized files; the limit is re-checked
    /// here so the extractor is safe to call directly.
    pub fn extract(&self, document: &ResumeDocument) -> AppResult<ExtractedText> {
        if document.size > self.max_file_size_bytes {
            return Err(AppError::FileTooLarge {
                size: document.size,
                limit: self.max_file_size_bytes,
            });
        }

        tracing::info!(
            file_name = %document.name,
            file_size = document.size,
            media_type = document.media_type.mime(),
            "Starting text extraction"
        );

        let (raw_text, metadata) = match document.media_type {
            MediaType::Pdf => pdf::extract_pdf(&document.content)?,
            MediaType::Docx => docx::extract_docx(&document.content)?,
        };

        let text = normalize_text(&raw_text);
        if text.trim().is_empty() {
            return Err(AppError::extraction("document contains no extractable text"));
        }

        tracing::debug!(
            characters = text.len(),
            pages = ?metadata.page_count,
            embedded_images = metadata.embedded_images,
            "Text extraction completed"
        );

        Ok(ExtractedText::new(text, metadata))
    }
}

/// Normalize line endings and trim trailing whitespace per line while keeping
/// blank lines, which section detection relies on.
fn normalize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.replace("\r\n", "\n").replace('\r', "\n").lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_preserves_blank_lines() {
        let text = normalize_text("Summary\r\n\r\nExperienced engineer.  \r\n");
        assert_eq!(text, "Summary\n\nExperienced engineer.\n");
    }

    #[test]
    fn oversized_document_is_rejected() {
        let extractor = TextExtractor::new(1024);
        let doc = ResumeDocument::new("big.pdf".into(), MediaType::Pdf, vec![0u8; 2048]);
        match extractor.extract(&doc) {
            Err(AppError::FileTooLarge { size, limit }) => {
                assert_eq!(size, 2048);
                assert_eq!(limit, 1024);
            }
            other => panic!("expected FileTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn section_lookup_by_offset() {
        let text = ExtractedText::from_plain(
            "Jane Doe\n\nExperience\nBuilt things.\n\nEducation\nBS, Somewhere.\n",
        );
        let offset = text.text.find("Built").unwrap();
        let span = text.section_for_offset(offset).unwrap();
        assert_eq!(span.kind, SectionKind::Experience);
    }
}
