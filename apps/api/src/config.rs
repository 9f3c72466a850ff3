use std::path::PathBuf;

use anyhow::{Context, Result};

/// Upload ceiling applied to the resume routes when `MAX_UPLOAD_BYTES` is unset.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// When false the embedding model is never loaded and semantic similarity is 0.0.
    pub enable_semantic_matching: bool,
    pub embedding_model: String,
    pub embedding_cache_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            enable_semantic_matching: optional_env("ENABLE_SEMANTIC_MATCHING")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            embedding_model: optional_env("EMBEDDING_MODEL")
                .unwrap_or_else(|| "all-MiniLM-L6-v2".to_string()),
            embedding_cache_dir: optional_env("EMBEDDING_CACHE_DIR").map(PathBuf::from),
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES")
                .map(|v| {
                    v.parse::<usize>()
                        .context("MAX_UPLOAD_BYTES must be a byte count")
                })
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            rust_log: "info".to_string(),
            enable_semantic_matching: true,
            embedding_model: "all-MiniLM-L6-v2".to_string(),
            embedding_cache_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
