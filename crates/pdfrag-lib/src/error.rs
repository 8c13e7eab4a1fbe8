use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the question-answering pipeline.
#[derive(Error, Debug)]
pub enum RagError {
    /// Required configuration (the API key) is missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to read document {path}: {reason}")]
    DocumentRead { path: PathBuf, reason: String },

    #[error("embedding service error: {0}")]
    EmbeddingService(String),

    #[error("generation service error: {0}")]
    GenerationService(String),

    /// Only reachable by loading the cache directly; `prepare` rebuilds instead.
    #[error("cache not found in {dir}: both vectors.index and chunks.json are required")]
    CacheMiss { dir: PathBuf },

    #[error("cache is corrupt: {0}")]
    CacheCorrupt(String),

    #[error("no index loaded: call prepare() first")]
    NotReady,

    #[error(
        "invalid chunk config: size={size}, overlap={overlap} (need size > 0 and overlap < size)"
    )]
    InvalidChunkConfig { size: usize, overlap: usize },

    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RagError {
    /// Whether the error only affects the current question, leaving a prepared
    /// session usable for the next one.
    pub fn is_per_question(&self) -> bool {
        matches!(
            self,
            Self::EmbeddingService(_) | Self::GenerationService(_) | Self::DimensionMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RagError>;
