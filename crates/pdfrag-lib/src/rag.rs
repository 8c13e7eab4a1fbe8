use std::path::Path;

use tracing::info;

use crate::backend::ModelBackend;
use crate::cache::CacheStore;
use crate::config::RagConfig;
use crate::corpus::Corpus;
use crate::error::{RagError, Result};
use crate::pipeline::chunker::ChunkConfig;
use crate::pipeline::ingest::{CorpusSource, prepare};
use crate::pipeline::query::{Answer, answer_question};

/// Question-answering session over one PDF.
///
/// Owns the model backend and, after a successful [`RagSystem::prepare`], the
/// corpus. Questions asked before that fail with [`RagError::NotReady`].
pub struct RagSystem<B> {
    backend: B,
    config: RagConfig,
    chunk_config: ChunkConfig,
    cache: CacheStore,
    corpus: Option<Corpus>,
}

impl<B: ModelBackend> RagSystem<B> {
    /// Validates the chunking parameters up front so a bad config fails
    /// before any document or network work.
    pub fn new(backend: B, config: RagConfig) -> Result<Self> {
        let chunk_config = ChunkConfig::new(config.chunk_size, config.chunk_overlap)?;
        let cache = CacheStore::new(config.cache_dir.clone());
        Ok(Self {
            backend,
            config,
            chunk_config,
            cache,
            corpus: None,
        })
    }

    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn corpus(&self) -> Option<&Corpus> {
        self.corpus.as_ref()
    }

    /// Load the cached corpus or build it from `pdf_path`.
    ///
    /// On failure any previously prepared corpus is dropped, so the session
    /// never answers from a stale index.
    pub fn prepare(&mut self, pdf_path: &Path) -> Result<CorpusSource> {
        self.corpus = None;
        let prepared = prepare(&self.backend, &self.cache, pdf_path, self.chunk_config)?;
        info!(
            chunk_count = prepared.corpus.len(),
            source = ?prepared.source,
            "Corpus ready"
        );
        self.corpus = Some(prepared.corpus);
        Ok(prepared.source)
    }

    /// Answer `query` from the top-k chunks of the prepared corpus.
    pub fn answer_question(&self, query: &str) -> Result<Answer> {
        let corpus = self.corpus.as_ref().ok_or(RagError::NotReady)?;
        answer_question(&self.backend, corpus, query, self.config.top_k)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::test_util::FakeBackend;

    fn config_in(dir: &Path) -> RagConfig {
        RagConfig {
            chunk_size: 40,
            chunk_overlap: 5,
            top_k: 2,
            cache_dir: dir.join("cache"),
            pdf_path: dir.join("doc.pdf"),
        }
    }

    #[test]
    fn answering_before_prepare_is_not_ready() {
        let tmp = tempfile::tempdir().unwrap();
        let system = RagSystem::new(FakeBackend::new(4), config_in(tmp.path())).unwrap();
        let err = system.answer_question("anything").unwrap_err();
        assert!(matches!(err, RagError::NotReady));
        assert_eq!(system.backend().embed_calls(), 0);
    }

    #[test]
    fn invalid_chunk_config_is_rejected_at_construction() {
        let tmp = tempfile::tempdir().unwrap();
        let config = RagConfig {
            chunk_overlap: 40,
            ..config_in(tmp.path())
        };
        assert!(matches!(
            RagSystem::new(FakeBackend::new(4), config),
            Err(RagError::InvalidChunkConfig {
                size: 40,
                overlap: 40
            })
        ));
    }

    #[test]
    fn failed_prepare_leaves_system_not_ready() {
        let tmp = tempfile::tempdir().unwrap();
        let mut system = RagSystem::new(FakeBackend::new(4), config_in(tmp.path())).unwrap();
        let err = system.prepare(&PathBuf::from("/nonexistent/doc.pdf")).unwrap_err();
        assert!(matches!(err, RagError::DocumentRead { .. }));
        assert!(system.corpus().is_none());
        assert!(matches!(
            system.answer_question("q"),
            Err(RagError::NotReady)
        ));
    }

    #[test]
    fn prepared_system_answers_with_top_k_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());
        let pdf = pdfrag_test_util::pdf::write_pdf(
            tmp.path(),
            &[
                "Data center revenue reached a record high this quarter",
                "Gaming revenue declined slightly year over year",
            ],
        );
        let mut system =
            RagSystem::new(FakeBackend::new(16).with_answer("Record data center revenue."), config)
                .unwrap();

        assert_eq!(system.prepare(&pdf).unwrap(), CorpusSource::Built);
        let answer = system.answer_question("How did data center do?").unwrap();

        assert_eq!(answer.text, "Record data center revenue.");
        assert_eq!(answer.sources.len(), 2);
        assert_eq!(system.backend().generate_calls(), 1);
    }

    #[test]
    fn second_session_loads_from_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let pdf = pdfrag_test_util::pdf::write_pdf(tmp.path(), &["Annual report text"]);

        let mut first = RagSystem::new(FakeBackend::new(8), config_in(tmp.path())).unwrap();
        assert_eq!(first.prepare(&pdf).unwrap(), CorpusSource::Built);

        let mut second = RagSystem::new(FakeBackend::new(8), config_in(tmp.path())).unwrap();
        assert_eq!(second.prepare(&pdf).unwrap(), CorpusSource::Loaded);
        assert_eq!(second.backend().embed_calls(), 0);
        assert_eq!(second.corpus(), first.corpus());
    }
}
