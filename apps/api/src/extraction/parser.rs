use std::sync::Arc;

use tracing::{debug, warn};

use crate::extraction::documents::{
    decode_utf8_ignoring_errors, DocumentFormat, DocumentTextExtractor, DocxTextExtractor,
    PdfTextExtractor,
};
use crate::extraction::entities::{first_person, EntityRecognizer};
use crate::extraction::fields::{
    extract_education, extract_email, extract_experience, extract_name_heuristic,
    extract_phone, extract_skills, truncate_chars, NAME_SCAN_CHARS,
};
use crate::models::resume::ResumeRecord;

/// Characters of extracted text kept on the record.
pub const RAW_TEXT_LIMIT: usize = 2000;

/// Turns uploaded resume bytes into a [`ResumeRecord`].
///
/// Stateless apart from its collaborators, which are injected at construction so the
/// server can share one parser across requests and tests can swap in stubs.
pub struct ResumeParser {
    pdf: Arc<dyn DocumentTextExtractor>,
    docx: Arc<dyn DocumentTextExtractor>,
    recognizer: Option<Arc<dyn EntityRecognizer>>,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new(Arc::new(PdfTextExtractor), Arc::new(DocxTextExtractor), None)
    }
}

impl ResumeParser {
    pub fn new(
        pdf: Arc<dyn DocumentTextExtractor>,
        docx: Arc<dyn DocumentTextExtractor>,
        recognizer: Option<Arc<dyn EntityRecognizer>>,
    ) -> Self {
        Self {
            pdf,
            docx,
            recognizer,
        }
    }

    pub fn with_entity_recognizer(mut self, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn has_entity_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Extracts text by file type, then runs every field extractor over it.
    pub fn parse(&self, content: &[u8], filename: &str) -> ResumeRecord {
        let text = self.extract_text(content, filename);
        self.parse_text(&text)
    }

    /// Runs the field extractors over already-extracted text.
    pub fn parse_text(&self, text: &str) -> ResumeRecord {
        ResumeRecord {
            name: self.extract_name(text),
            email: extract_email(text),
            phone: extract_phone(text),
            skills: extract_skills(text),
            experience: extract_experience(text),
            education: extract_education(text),
            raw_text: truncate_raw_text(text),
        }
    }

    /// Extraction failures in the PDF/DOCX collaborators degrade to empty text.
    pub fn extract_text(&self, content: &[u8], filename: &str) -> String {
        let format = DocumentFormat::from_filename(filename);
        let extractor = match format {
            DocumentFormat::Pdf => &self.pdf,
            DocumentFormat::Docx => &self.docx,
            DocumentFormat::PlainText => return decode_utf8_ignoring_errors(content),
        };

        match extractor.extract(content) {
            Ok(text) => {
                debug!(filename, ?format, bytes = text.len(), "Extracted document text");
                text
            }
            Err(e) => {
                warn!(filename, ?format, "Text extraction failed, using empty text: {e}");
                String::new()
            }
        }
    }

    /// First `PERSON` entity in the opening of the text when a recognizer is configured,
    /// otherwise the first-lines heuristic. A recognizer error also uses the heuristic.
    pub fn extract_name(&self, text: &str) -> String {
        let Some(recognizer) = &self.recognizer else {
            return extract_name_heuristic(text);
        };

        match recognizer.entities(truncate_chars(text, NAME_SCAN_CHARS)) {
            Ok(entities) => first_person(&entities).unwrap_or_default().to_string(),
            Err(e) => {
                warn!("Entity recognizer failed, falling back to heuristic: {e}");
                extract_name_heuristic(text)
            }
        }
    }
}

fn truncate_raw_text(text: &str) -> String {
    let head = truncate_chars(text, RAW_TEXT_LIMIT);
    if head.len() < text.len() {
        format!("{head}...")
    } else {
        text.to_string()
    }
}
