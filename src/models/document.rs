use serde::{Deserialize, Serialize};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Pdf,
    Docx,
}

impl MediaType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            PDF_MIME => Some(MediaType::Pdf),
            DOCX_MIME => Some(MediaType::Docx),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(MediaType::Pdf)
        } else if lower.ends_with(".docx") {
            Some(MediaType::Docx)
        } else {
            None
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => PDF_MIME,
            MediaType::Docx => DOCX_MIME,
        }
    }
}

/// An uploaded resume, held only for the duration of one analysis session.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub name: String,
    pub media_type: MediaType,
    pub size: usize,
    pub content: Vec<u8>,
}

impl ResumeDocument {
    pub fn new(name: String, media_type: MediaType, content: Vec<u8>) -> Self {
        let size = content.len();
        Self {
            name,
            media_type,
            size,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_from_mime() {
        assert_eq!(MediaType::from_mime(PDF_MIME), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_mime(DOCX_MIME), Some(MediaType::Docx));
        assert_eq!(MediaType::from_mime("text/plain"), None);
        assert_eq!(MediaType::from_mime("application/msword"), None);
    }

    #[test]
    fn media_type_from_file_name() {
        assert_eq!(MediaType::from_file_name("resume.PDF"), Some(MediaType::Pdf));
        assert_eq!(MediaType::from_file_name("cv.docx"), Some(MediaType::Docx));
        assert_eq!(MediaType::from_file_name("notes.txt"), None);
    }

    #[test]
    fn document_records_size() {
        let doc = ResumeDocument::new("r.pdf".into(), MediaType::Pdf, vec![0u8; 1024]);
        assert_eq!(doc.size, 1024);
    }
}
