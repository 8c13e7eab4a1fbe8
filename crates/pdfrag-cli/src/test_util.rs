use std::cell::Cell;
use std::path::Path;

use pdfrag_lib::backend::ModelBackend;
use pdfrag_lib::config::RagConfig;
use pdfrag_lib::error::{RagError, Result};
use pdfrag_lib::rag::RagSystem;
use pdfrag_test_util::embedding::hashed_embedding;
use pdfrag_test_util::pdf::write_pdf;

const DIMENSION: usize = 16;

/// Backend that numbers its answers (`answer 1`, `answer 2`, ...) and can be
/// told to fail embedding one specific question.
pub struct ScriptedBackend {
    fail_on: Option<String>,
    embed_calls: Cell<usize>,
    generate_calls: Cell<usize>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            fail_on: None,
            embed_calls: Cell::new(0),
            generate_calls: Cell::new(0),
        }
    }

    pub fn failing_on(mut self, question: &str) -> Self {
        self.fail_on = Some(question.to_string());
        self
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.get()
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.get()
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBackend for ScriptedBackend {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_calls.set(self.embed_calls.get() + 1);
        if self.fail_on.as_deref() == Some(text) {
            return Err(RagError::EmbeddingService("503 Service Unavailable".into()));
        }
        Ok(hashed_embedding(text, DIMENSION))
    }

    fn generate(&self, _prompt: &str) -> Result<String> {
        let n = self.generate_calls.get() + 1;
        self.generate_calls.set(n);
        Ok(format!("answer {n}"))
    }
}

/// A [`RagSystem`] whose PDF and cache live under `dir`.
pub fn system_in(dir: &Path, backend: ScriptedBackend) -> RagSystem<ScriptedBackend> {
    let config = RagConfig {
        chunk_size: 40,
        chunk_overlap: 5,
        top_k: 2,
        cache_dir: dir.join("cache"),
        pdf_path: dir.join("document.pdf"),
    };
    RagSystem::new(backend, config).unwrap()
}

/// A [`RagSystem`] over a freshly written PDF with the given pages.
///
/// The caller must hold the returned [`tempfile::TempDir`] for the duration
/// of the test.
pub fn system_with_pdf(
    pages: &[&str],
    backend: ScriptedBackend,
) -> (tempfile::TempDir, RagSystem<ScriptedBackend>) {
    let tmp = tempfile::tempdir().unwrap();
    write_pdf(tmp.path(), pages);
    let system = system_in(tmp.path(), backend);
    (tmp, system)
}
