//! DOCX text extraction: reads `word/document.xml` out of the OOXML zip
//! container and walks it with a streaming XML reader, preserving paragraph
//! breaks, line breaks, and tabs.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

use super::ExtractionMetadata;
use crate::error::{AppError, AppResult};

pub fn extract_docx(content: &[u8]) -> AppResult<(String, ExtractionMetadata)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))
        .map_err(|e| AppError::extraction(format!("not a valid DOCX archive: {}", e)))?;

    let embedded_images = archive
        .file_names()
        .filter(|name| name.starts_with("word/media/"))
        .count();

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::extraction(format!("DOCX missing document body: {}", e)))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::extraction(format!("failed to read DOCX body: {}", e)))?;

    let (text, has_tables) = walk_document_xml(&xml)?;

    let metadata = ExtractionMetadata {
        page_count: None,
        embedded_images,
        has_tables,
        file_size_bytes: content.len(),
    };

    Ok((text, metadata))
}

fn walk_document_xml(xml: &str) -> AppResult<(String, bool)> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut has_tables = false;
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:tbl" => has_tables = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:tab" => text.push('\t'),
                b"w:tbl" => has_tables = true,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let chunk = t
                    .unescape()
                    .map_err(|e| AppError::extraction(format!("malformed DOCX XML: {}", e)))?;
                text.push_str(&chunk);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::extraction(format!("malformed DOCX XML: {}", e)));
            }
            Ok(_) => {}
        }
    }

    Ok((text, has_tables))
}

/// Test-only helper: wrap paragraphs into a minimal but valid DOCX archive.
#[cfg(test)]
pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;

    let mut body = String::new();
    for p in paragraphs {
        body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
        let escaped = p
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        body.push_str(&escaped);
        body.push_str("</w:t></w:r></w:p>");
    }
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    writer
        .start_file("[Content_Types].xml", options)
        .expect("start content types");
    writer
        .write_all(
            b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
              <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
              <Default Extension=\"xml\" ContentType=\"application/xml\"/></Types>",
        )
        .expect("write content types");
    writer
        .start_file("word/document.xml", options)
        .expect("start document.xml");
    writer
        .write_all(document.as_bytes())
        .expect("write document.xml");
    writer.finish().expect("finish archive").into_inner()
}
