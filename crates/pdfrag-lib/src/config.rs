use std::path::PathBuf;

/// Maximum number of characters in a single chunk.
pub const CHUNK_SIZE: usize = 800;

/// Number of characters each chunk shares with the previous one.
pub const CHUNK_OVERLAP: usize = 100;

/// Default number of chunks retrieved as context for a question.
pub const DEFAULT_TOP_K: usize = 3;

/// Embedding model used for both chunks and queries.
///
/// Chunks and queries must be embedded by the same model; a cache built with
/// one model is meaningless to another.
pub const EMBEDDING_MODEL: &str = "text-embedding-004";

/// Chat model used to generate answers.
pub const CHAT_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Generative Language REST API.
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Per-request timeout for calls to the model API.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Directory (relative to the working directory) holding the cache artifacts.
pub const CACHE_DIR: &str = "cache";

/// PDF answered against by the interactive loop.
pub const PDF_PATH: &str = "docs/nvidia_10K.pdf";

/// Tunables for one question-answering session.
///
/// [`RagConfig::default`] returns the compiled-in values above. There is no
/// config file; tests build their own values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub cache_dir: PathBuf,
    pub pdf_path: PathBuf,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            chunk_overlap: CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
            cache_dir: PathBuf::from(CACHE_DIR),
            pdf_path: PathBuf::from(PDF_PATH),
        }
    }
}
