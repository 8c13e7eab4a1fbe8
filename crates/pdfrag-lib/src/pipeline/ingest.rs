use std::path::Path;

use tracing::{debug, info};

use crate::backend::ModelBackend;
use crate::cache::CacheStore;
use crate::corpus::Corpus;
use crate::error::{RagError, Result};
use crate::index::FlatIndex;
use crate::pdf::extract_text;
use crate::pipeline::chunker::{ChunkConfig, chunk_text};

/// How a prepared corpus was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusSource {
    /// Restored from the cache directory without touching the PDF.
    Loaded,
    /// Extracted, chunked and embedded from the PDF, then cached.
    Built,
}

#[derive(Debug)]
pub struct Prepared {
    pub corpus: Corpus,
    pub source: CorpusSource,
}

/// Load the corpus from `cache` if both artifacts exist, otherwise build it
/// from `pdf_path` and write the cache.
///
/// A cache with only one artifact counts as a miss and is overwritten.
pub fn prepare<B: ModelBackend>(
    backend: &B,
    cache: &CacheStore,
    pdf_path: &Path,
    config: ChunkConfig,
) -> Result<Prepared> {
    if cache.exists() {
        debug!(dir = %cache.dir().display(), "Cache hit");
        return Ok(Prepared {
            corpus: cache.load()?,
            source: CorpusSource::Loaded,
        });
    }

    debug!(dir = %cache.dir().display(), "Cache miss, building index");
    let corpus = build_corpus(backend, pdf_path, config)?;
    cache.save(&corpus)?;
    Ok(Prepared {
        corpus,
        source: CorpusSource::Built,
    })
}

/// Extract, chunk and embed the PDF at `pdf_path`.
pub fn build_corpus<B: ModelBackend>(
    backend: &B,
    pdf_path: &Path,
    config: ChunkConfig,
) -> Result<Corpus> {
    info!(path = %pdf_path.display(), "Reading PDF");
    let text = extract_text(pdf_path)?;
    if text.trim().is_empty() {
        return Err(RagError::DocumentRead {
            path: pdf_path.to_path_buf(),
            reason: "no extractable text".to_string(),
        });
    }
    build_corpus_from_text(backend, &text, config)
}

/// Chunk `text` and embed every chunk, one request at a time, in order.
///
/// The first embedding fixes the index dimension. Any failed request aborts
/// the build.
pub fn build_corpus_from_text<B: ModelBackend>(
    backend: &B,
    text: &str,
    config: ChunkConfig,
) -> Result<Corpus> {
    let chunks = chunk_text(text, config);
    info!(
        text_len = text.len(),
        chunk_count = chunks.len(),
        "Generating embeddings for chunks"
    );

    let mut index: Option<FlatIndex> = None;
    for (position, chunk) in chunks.iter().enumerate() {
        let embedding = backend.embed(chunk)?;
        debug!(
            position,
            chunk_len = chunk.len(),
            dimension = embedding.len(),
            "Embedded chunk"
        );
        index
            .get_or_insert_with(|| FlatIndex::new(embedding.len()))
            .add(&[embedding])?;
    }

    let index = index.unwrap_or_else(|| FlatIndex::new(0));
    Corpus::new(index, chunks)
}
