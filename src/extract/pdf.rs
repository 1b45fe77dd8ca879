//! PDF text extraction via `pdf-extract`, with `lopdf` supplying the
//! structure probe (page count, embedded images) for the metadata channel.

use lopdf::{Document, Object};
use pdf_extract::extract_text;
use std::io::Write;
use tempfile::NamedTempFile;

use super::ExtractionMetadata;
use crate::error::{AppError, AppResult};

pub fn extract_pdf(content: &[u8]) -> AppResult<(String, ExtractionMetadata)> {
    let mut metadata = ExtractionMetadata {
        file_size_bytes: content.len(),
        ..Default::default()
    };

    match Document::load_mem(content) {
        Ok(doc) => {
            metadata.page_count = Some(doc.get_pages().len());
            metadata.embedded_images = count_image_objects(&doc);
        }
        Err(e) => {
            tracing::warn!(
                "PDF structure validation failed: {}, will try text extraction anyway",
                e
            );
        }
    }

    // pdf-extract wants a path, not bytes.
    let mut temp_file = NamedTempFile::new().map_err(|e| {
        AppError::extraction(format!("failed to create temporary file: {}", e))
    })?;
    temp_file.write_all(content).map_err(|e| {
        AppError::extraction(format!("failed to write PDF to temporary file: {}", e))
    })?;

    let text = extract_text(temp_file.path())
        .map_err(|e| AppError::extraction(format!("PDF text extraction failed: {}", e)))?;

    Ok((text, metadata))
}

fn count_image_objects(doc: &Document) -> usize {
    doc.objects
        .values()
        .filter(|object| {
            if let Object::Stream(stream) = object {
                if let Ok(subtype) = stream.dict.get(b"Subtype") {
                    if let Ok(name) = subtype.as_name() {
                        return name == b"Image";
                    }
                }
            }
            false
        })
        .count()
}
