use tracing::debug;

use crate::backend::ModelBackend;
use crate::corpus::{Corpus, RetrievedChunk};
use crate::error::Result;

/// A generated answer and the chunks it was conditioned on.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<RetrievedChunk>,
}

/// Render the single user message sent to the chat model.
///
/// Context chunks are joined with a blank line, in retrieval order.
pub fn render_prompt<S: AsRef<str>>(chunks: &[S], query: &str) -> String {
    let context = chunks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "Answer the question using the context below.\n\nContext:\n{context}\n\nQuestion: {query}"
    )
}

/// Embed `query`, retrieve the `k` nearest chunks and generate an answer.
///
/// Makes exactly two backend calls: one embedding and one generation.
pub fn answer_question<B: ModelBackend>(
    backend: &B,
    corpus: &Corpus,
    query: &str,
    k: usize,
) -> Result<Answer> {
    debug!(query_len = query.len(), k, "Answering question");
    let query_embedding = backend.embed(query)?;
    let sources = corpus.retrieve(&query_embedding, k)?;
    for source in &sources {
        debug!(
            position = source.position,
            distance = source.distance,
            "Retrieved chunk"
        );
    }
    let texts: Vec<&str> = sources.iter().map(|s| s.text.as_str()).collect();
    let prompt = render_prompt(&texts, query);
    let text = backend.generate(&prompt)?;
    Ok(Answer { text, sources })
}
