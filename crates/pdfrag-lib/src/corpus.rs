use crate::error::{RagError, Result};
use crate::index::FlatIndex;

/// A chunk returned by retrieval, with its position in the chunk sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    pub position: usize,
    pub distance: f32,
    pub text: String,
}

/// The vector index together with the chunk sequence it was built from.
///
/// Vector `i` of the index is the embedding of `chunks[i]`. The pair is only
/// constructible when the lengths agree and is immutable afterwards, so a
/// search hit always maps back to its own chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    index: FlatIndex,
    chunks: Vec<String>,
}

impl Corpus {
    pub fn new(index: FlatIndex, chunks: Vec<String>) -> Result<Self> {
        if index.len() != chunks.len() {
            return Err(RagError::CacheCorrupt(format!(
                "index holds {} vectors but there are {} chunks",
                index.len(),
                chunks.len()
            )));
        }
        Ok(Self { index, chunks })
    }

    pub fn index(&self) -> &FlatIndex {
        &self.index
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The `k` chunks nearest to `query`, nearest first.
    pub fn retrieve(&self, query: &[f32], k: usize) -> Result<Vec<RetrievedChunk>> {
        let hits = self.index.search(query, k)?;
        Ok(hits
            .into_iter()
            .map(|hit| RetrievedChunk {
                position: hit.index,
                distance: hit.distance,
                // Positions come from the index, which is aligned with chunks.
                text: self.chunks[hit.index].clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        let mut index = FlatIndex::new(2);
        index
            .add(&[vec![0.0, 0.0], vec![10.0, 0.0], vec![0.0, 10.0]])
            .unwrap();
        Corpus::new(
            index,
            vec!["origin".into(), "east".into(), "north".into()],
        )
        .unwrap()
    }

    #[test]
    fn rejects_misaligned_index_and_chunks() {
        let mut index = FlatIndex::new(1);
        index.add(&[vec![1.0]]).unwrap();
        let err = Corpus::new(index, vec!["a".into(), "b".into()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cache is corrupt: index holds 1 vectors but there are 2 chunks"
        );
    }

    #[test]
    fn retrieve_maps_positions_to_their_chunks() {
        let corpus = corpus();
        for (position, query) in [[0.1, 0.1], [9.0, 1.0], [1.0, 9.0]].iter().enumerate() {
            let hits = corpus.retrieve(query, 1).unwrap();
            assert_eq!(hits[0].position, position);
            assert_eq!(hits[0].text, corpus.chunks()[position]);
        }
    }

    #[test]
    fn retrieve_returns_nearest_first() {
        let hits = corpus().retrieve(&[8.0, 3.0], 3).unwrap();
        let texts: Vec<&str> = hits.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["east", "origin", "north"]);
    }
}
