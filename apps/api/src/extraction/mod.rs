// Extractor: resume bytes → ResumeRecord.
// Document text, entity recognition and field heuristics are kept in separate modules so
// the black-box collaborators can be swapped without touching the heuristics.

pub mod documents;
pub mod entities;
pub mod fields;
pub mod handlers;
pub mod parser;
pub mod skills;
