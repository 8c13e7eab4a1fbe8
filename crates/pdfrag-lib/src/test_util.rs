use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use pdfrag_test_util::embedding::hashed_embedding;

use crate::backend::ModelBackend;
use crate::error::{RagError, Result};

/// In-process [`ModelBackend`] with deterministic embeddings and call
/// recording.
///
/// Texts without an explicit embedding get [`hashed_embedding`]. Generation
/// returns a canned answer.
pub struct FakeBackend {
    dimension: usize,
    embeddings: HashMap<String, Vec<f32>>,
    answer: String,
    fail_embed_on: Option<String>,
    fail_generate: bool,
    embedded: RefCell<Vec<String>>,
    prompts: RefCell<Vec<String>>,
    generate_calls: Cell<usize>,
}

impl FakeBackend {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            embeddings: HashMap::new(),
            answer: "fake answer".to_string(),
            fail_embed_on: None,
            fail_generate: false,
            embedded: RefCell::new(Vec::new()),
            prompts: RefCell::new(Vec::new()),
            generate_calls: Cell::new(0),
        }
    }

    pub fn with_embedding(mut self, text: &str, embedding: Vec<f32>) -> Self {
        self.embeddings.insert(text.to_string(), embedding);
        self
    }

    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answer = answer.to_string();
        self
    }

    pub fn failing_embed_on(mut self, text: &str) -> Self {
        self.fail_embed_on = Some(text.to_string());
        self
    }

    pub fn failing_generate(mut self) -> Self {
        self.fail_generate = true;
        self
    }

    pub fn embed_calls(&self) -> usize {
        self.embedded.borrow().len()
    }

    pub fn embedded_texts(&self) -> Vec<String> {
        self.embedded.borrow().clone()
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.get()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl ModelBackend for FakeBackend {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embedded.borrow_mut().push(text.to_string());
        if self.fail_embed_on.as_deref() == Some(text) {
            return Err(RagError::EmbeddingService("503 Service Unavailable".into()));
        }
        Ok(self
            .embeddings
            .get(text)
            .cloned()
            .unwrap_or_else(|| hashed_embedding(text, self.dimension)))
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_calls.set(self.generate_calls.get() + 1);
        self.prompts.borrow_mut().push(prompt.to_string());
        if self.fail_generate {
            return Err(RagError::GenerationService("500 Internal Server Error".into()));
        }
        Ok(self.answer.clone())
    }
}
