//! Best-effort text extraction from uploaded resume files.
//!
//! Dispatch is an ordered strategy chain keyed on the declared file
//! extension: the format-specific decoder runs first and any failure falls
//! through to the raw byte decoder, which itself tries a fixed sequence of
//! encodings. The final fallback is the empty string — extraction never
//! returns an error and never panics past this boundary.

use encoding_rs::{Encoding, UTF_16LE, UTF_8, WINDOWS_1252};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use tracing::debug;

/// Encodings attempted by the raw decode path, in order.
const ENCODINGS: [&Encoding; 3] = [UTF_8, WINDOWS_1252, UTF_16LE];

/// A decoded candidate shorter than this (after trimming) is rejected as noise.
const MIN_DECODED_CHARS: usize = 10;

/// Extracts plain text from an uploaded file. The filename is used only for
/// extension sniffing; the content is decoded from `data` alone.
pub fn extract_text(filename: &str, data: &[u8]) -> String {
    match extension_of(filename).as_deref() {
        Some("pdf") => extract_pdf(data).unwrap_or_else(|| decode_plain(data)),
        Some("docx") => extract_docx(data).unwrap_or_else(|| decode_plain(data)),
        _ => decode_plain(data),
    }
}

fn extension_of(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// PDF path: page texts concatenated with newlines, surrounding whitespace
/// stripped. `pdf-extract` is not panic-safe on malformed files, so the call
/// is fenced with `catch_unwind` to keep the never-fails contract.
fn extract_pdf(data: &[u8]) -> Option<String> {
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data));
    match result {
        Ok(Ok(text)) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        }
        Ok(Err(e)) => {
            debug!("pdf extraction failed, falling back to raw decode: {e}");
            None
        }
        Err(_) => {
            debug!("pdf extraction panicked, falling back to raw decode");
            None
        }
    }
}

/// DOCX path: the document is a zip archive; paragraph text lives in `<w:t>`
/// runs inside `word/document.xml`. Non-empty paragraphs are joined with
/// newlines.
fn extract_docx(data: &[u8]) -> Option<String> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor).ok()?;
    let mut document = String::new();
    archive
        .by_name("word/document.xml")
        .ok()?
        .read_to_string(&mut document)
        .ok()?;

    let mut reader = Reader::from_str(&document);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"w:t" => in_text_run = false,
            Ok(Event::Text(t)) if in_text_run => {
                current.push_str(&t.unescape().ok()?);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => {
                let paragraph = current.trim();
                if !paragraph.is_empty() {
                    paragraphs.push(paragraph.to_string());
                }
                current.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!("docx xml parse failed, falling back to raw decode: {e}");
                return None;
            }
            _ => {}
        }
    }

    if paragraphs.is_empty() {
        None
    } else {
        Some(paragraphs.join("\n"))
    }
}

/// Raw decode path: first encoding that decodes without errors into more
/// than `MIN_DECODED_CHARS` non-whitespace-trimmed characters wins. BOM
/// sniffing inside `decode` means a UTF-16 BOM short-circuits correctly even
/// on the UTF-8 attempt.
fn decode_plain(data: &[u8]) -> String {
    for encoding in ENCODINGS {
        let (text, _, had_errors) = encoding.decode(data);
        if !had_errors && text.trim().chars().count() > MIN_DECODED_CHARS {
            return text.into_owned();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\njane.doe@example.com\nExperience: data analysis";

    #[test]
    fn test_utf8_text_round_trips() {
        assert_eq!(extract_text("resume.txt", SAMPLE.as_bytes()), SAMPLE);
    }

    #[test]
    fn test_missing_extension_uses_raw_decode() {
        assert_eq!(extract_text("resume", SAMPLE.as_bytes()), SAMPLE);
    }

    #[test]
    fn test_extension_sniffing_is_case_insensitive() {
        assert_eq!(extension_of("Resume.PDF").as_deref(), Some("pdf"));
        assert_eq!(extension_of("cv.Docx").as_deref(), Some("docx"));
        assert_eq!(extension_of("notes"), None);
    }

    #[test]
    fn test_latin1_bytes_decode() {
        // "Résumé of José" in Latin-1: é = 0xE9, invalid as UTF-8.
        let bytes = b"R\xE9sum\xE9 of Jos\xE9, data analyst";
        let text = extract_text("resume.txt", bytes);
        assert!(text.contains("Résumé"));
        assert!(text.contains("José"));
    }

    #[test]
    fn test_utf16le_with_bom_decodes() {
        let mut bytes = vec![0xFF, 0xFE]; // UTF-16LE BOM
        for unit in SAMPLE.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(extract_text("resume.txt", &bytes), SAMPLE);
    }

    #[test]
    fn test_short_content_yields_empty() {
        assert_eq!(extract_text("resume.txt", b"abc"), "");
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert_eq!(extract_text("resume.txt", b""), "");
    }

    #[test]
    fn test_corrupt_pdf_degrades_to_raw_decode() {
        // Not a PDF at all: the pdf path fails and the bytes decode as text.
        let text = extract_text("resume.pdf", SAMPLE.as_bytes());
        assert_eq!(text, SAMPLE);
    }

    #[test]
    fn test_corrupt_docx_degrades_to_raw_decode() {
        let text = extract_text("resume.docx", SAMPLE.as_bytes());
        assert_eq!(text, SAMPLE);
    }

    #[test]
    fn test_truncated_zip_degrades_without_panic() {
        // A zip local-file-header magic with garbage after it.
        let mut bytes = b"PK\x03\x04".to_vec();
        bytes.extend_from_slice(&[0u8; 40]);
        // Only the never-panics contract is asserted; the bytes are garbage.
        let _ = extract_text("resume.docx", &bytes);
    }

    #[test]
    fn test_docx_paragraphs_join_with_newlines() {
        let document_xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t>Skills: </w:t></w:r><w:r><w:t>SQL, Python</w:t></w:r></w:p>
    <w:p><w:r><w:t></w:t></w:r></w:p>
    <w:p><w:r><w:t>Education</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::FileOptions::default();
            use std::io::Write;
            writer.start_file("word/document.xml", options).unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }

        let text = extract_text("resume.docx", buf.get_ref());
        assert_eq!(text, "Jane Doe\nSkills: SQL, Python\nEducation");
    }
}
