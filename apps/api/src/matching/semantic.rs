//! Sentence-embedding similarity between resume text and a job description.
//!
//! The embedding model is a black box behind [`TextEmbedder`]; the default backend is
//! fastembed's all-MiniLM-L6-v2, loaded once at startup.

use std::path::PathBuf;
use std::sync::Mutex;

use fastembed::{InitOptions, TextEmbedding};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::extraction::fields::truncate_chars;

/// Characters of each (whitespace-collapsed) text handed to the model.
pub const EMBED_CHAR_LIMIT: usize = 1000;

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Model initialization failed: {0}")]
    InitFailed(String),

    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),

    #[error("Invalid model name: {0}")]
    InvalidModel(String),
}

/// Black-box text → vector function.
pub trait TextEmbedder: Send + Sync {
    /// One vector per input text, in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    fn model_name(&self) -> &str;
}

/// fastembed-backed embedder. `TextEmbedding::embed` needs `&mut self`, hence the Mutex.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
    model_name: String,
}

impl FastEmbedder {
    /// Loads (downloading on first use) the named model. Files are cached under
    /// `cache_dir` when given, otherwise in fastembed's default cache location.
    pub fn new(model_name: &str, cache_dir: Option<PathBuf>) -> Result<Self, EmbeddingError> {
        let model_enum = parse_model_name(model_name)?;

        let mut options = InitOptions::new(model_enum).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            std::fs::create_dir_all(&dir).map_err(|e| {
                EmbeddingError::InitFailed(format!("Failed to create cache directory: {e}"))
            })?;
            options = options.with_cache_dir(dir);
        }

        let model =
            TextEmbedding::try_new(options).map_err(|e| EmbeddingError::InitFailed(e.to_string()))?;

        Ok(Self {
            model: Mutex::new(model),
            model_name: model_name.to_string(),
        })
    }
}

impl TextEmbedder for FastEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let mut model = self.model.lock().map_err(|e| {
            EmbeddingError::EmbeddingFailed(format!("Failed to acquire model lock: {e}"))
        })?;

        model
            .embed(texts.to_vec(), None)
            .map_err(|e| EmbeddingError::EmbeddingFailed(e.to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

fn parse_model_name(name: &str) -> Result<fastembed::EmbeddingModel, EmbeddingError> {
    match name.to_lowercase().as_str() {
        "all-minilm-l6-v2" | "allminiml6v2" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2),
        "all-minilm-l6-v2-q" | "allminiml6v2q" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2Q),
        "all-minilm-l12-v2" | "allminiml12v2" => Ok(fastembed::EmbeddingModel::AllMiniLML12V2),
        "bge-small-en-v1.5" | "bgesmallenv15" => Ok(fastembed::EmbeddingModel::BGESmallENV15),
        "bge-base-en-v1.5" | "bgebaseenv15" => Ok(fastembed::EmbeddingModel::BGEBaseENV15),
        _ => Err(EmbeddingError::InvalidModel(name.to_string())),
    }
}

/// Collapses whitespace runs to single spaces, trims, and keeps the first
/// [`EMBED_CHAR_LIMIT`] characters.
pub fn prepare_text(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    truncate_chars(collapsed.trim(), EMBED_CHAR_LIMIT).to_string()
}

/// Cosine of the angle between `a` and `b`. 0.0 for mismatched lengths or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
