//! Named-entity recognition seam used for name detection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entity label used for people, following the common CoNLL/OntoNotes tag set.
pub const PERSON_LABEL: &str = "PERSON";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
}

#[derive(Debug, Error)]
pub enum EntityError {
    #[error("Entity recognition failed: {0}")]
    Recognition(String),
}

/// Black-box recognizer: text in, labelled spans out, in document order.
///
/// The parser holds an `Option<Arc<dyn EntityRecognizer>>`; when none is configured
/// names fall back to a first-lines heuristic.
pub trait EntityRecognizer: Send + Sync {
    fn entities(&self, text: &str) -> Result<Vec<Entity>, EntityError>;
}

/// First entity tagged `PERSON`, if any.
pub fn first_person(entities: &[Entity]) -> Option<&str> {
    entities
        .iter()
        .find(|e| e.label == PERSON_LABEL)
        .map(|e| e.text.as_str())
}
