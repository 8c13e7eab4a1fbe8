use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::error::{RagError, Result};
use crate::index::FlatIndex;

/// File name of the serialized vector index.
pub const INDEX_FILE: &str = "vectors.index";

/// File name of the serialized chunk list.
pub const CHUNKS_FILE: &str = "chunks.json";

/// Persists a [`Corpus`] as two artifacts in one directory.
///
/// Both artifacts are written together and only read together. The store
/// takes no locks: two processes writing the same directory can interleave.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    pub fn chunks_path(&self) -> PathBuf {
        self.dir.join(CHUNKS_FILE)
    }

    /// True only when both artifacts are present.
    pub fn exists(&self) -> bool {
        self.index_path().is_file() && self.chunks_path().is_file()
    }

    pub fn load(&self) -> Result<Corpus> {
        if !self.exists() {
            return Err(RagError::CacheMiss {
                dir: self.dir.clone(),
            });
        }
        let index = FlatIndex::from_bytes(&fs::read(self.index_path())?)?;
        let chunks: Vec<String> = serde_json::from_slice(&fs::read(self.chunks_path())?)
            .map_err(|e| RagError::CacheCorrupt(format!("failed to parse {CHUNKS_FILE}: {e}")))?;
        let corpus = Corpus::new(index, chunks)?;
        info!(
            dir = %self.dir.display(),
            chunk_count = corpus.len(),
            "Loaded cached index"
        );
        Ok(corpus)
    }

    /// Write both artifacts.
    ///
    /// `vectors.index` is the commit marker: any existing one is removed
    /// first and the new one is renamed into place last, so a save that fails
    /// partway leaves no index and the next `prepare` rebuilds.
    pub fn save(&self, corpus: &Corpus) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let index = corpus.index().to_bytes()?;
        let chunks = serde_json::to_vec(corpus.chunks())
            .map_err(|e| RagError::CacheCorrupt(format!("failed to serialize chunks: {e}")))?;

        remove_if_present(&self.index_path())?;
        let chunks_tmp = tmp_path(&self.chunks_path());
        let index_tmp = tmp_path(&self.index_path());
        fs::write(&chunks_tmp, &chunks)?;
        fs::write(&index_tmp, &index)?;
        fs::rename(&chunks_tmp, self.chunks_path())?;
        fs::rename(&index_tmp, self.index_path())?;

        info!(
            dir = %self.dir.display(),
            chunk_count = corpus.len(),
            "Saved index and chunks"
        );
        Ok(())
    }

    /// Remove both artifacts so the next `prepare` rebuilds from the PDF.
    pub fn clear(&self) -> Result<()> {
        for path in [self.index_path(), self.chunks_path()] {
            if remove_if_present(&path)? {
                debug!(path = %path.display(), "Removed cache artifact");
            }
        }
        Ok(())
    }
}

/// Sibling path an artifact is written to before being renamed into place.
fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Remove `path`, returning whether it existed.
fn remove_if_present(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
