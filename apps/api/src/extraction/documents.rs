//! Document text extraction: file-format detection plus the PDF and DOCX extractors.

use std::io::{Cursor, Read};
use std::panic::{catch_unwind, AssertUnwindSafe};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Extensions accepted by the upload routes.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "doc", "txt"];

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("DOCX read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Source format of an uploaded resume, chosen from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    /// `pdf` → PDF, `docx`/`doc` → DOCX, anything else (or no extension) → plain text.
    pub fn from_filename(filename: &str) -> Self {
        match file_extension(filename).as_deref() {
            Some("pdf") => DocumentFormat::Pdf,
            Some("docx") | Some("doc") => DocumentFormat::Docx,
            _ => DocumentFormat::PlainText,
        }
    }
}

/// Lowercased text after the last `.`, if the name has one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

pub fn is_supported_filename(filename: &str) -> bool {
    file_extension(filename)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Black-box conversion from a binary document to plain text.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract(&self, content: &[u8]) -> Result<String, ExtractionError>;
}

/// Text extraction via `pdf-extract`. The crate panics on some malformed inputs, so
/// panics are caught and reported as errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl DocumentTextExtractor for PdfTextExtractor {
    fn extract(&self, content: &[u8]) -> Result<String, ExtractionError> {
        match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(content))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
            Err(_) => Err(ExtractionError::Pdf("PDF parser panicked".to_string())),
        }
    }
}

/// Reads `word/document.xml` out of a DOCX archive and joins its text runs, one line
/// per paragraph. Legacy binary `.doc` files are not zip archives and fail here.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxTextExtractor;

impl DocumentTextExtractor for DocxTextExtractor {
    fn extract(&self, content: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(content))?;
        let mut xml = String::new();
        archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
        document_xml_to_text(&xml)
    }
}

/// Walks the WordprocessingML body. Text inside `w:t` is unescaped (named and
/// numeric references), `w:tab` becomes a tab, `w:br`/`w:cr` a newline, and each
/// closed `w:p` ends a line.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text_run => text.push_str(&e.unescape()?),
            Event::CData(e) if in_text_run => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()))
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}

/// Decodes bytes as UTF-8, silently dropping invalid sequences.
pub fn decode_utf8_ignoring_errors(content: &[u8]) -> String {
    content.utf8_chunks().map(|chunk| chunk.valid()).collect()
}
