use bincode::config::{Configuration, Limit, LittleEndian, Varint, standard};
use bincode::{Decode, Encode, decode_from_slice, encode_to_vec};

use crate::error::{RagError, Result};

/// One search hit: the stored vector's position and its squared L2 distance
/// to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f32,
}

/// Brute-force exact nearest-neighbor index over fixed-dimension vectors.
///
/// Vectors are stored contiguously in insertion order; a vector's position is
/// the order in which it was added and never changes.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct FlatIndex {
    dimension: usize,
    data: Vec<f32>,
}

/// Upper bound on the bytes a serialized index may claim while decoding, so a
/// corrupt length prefix fails instead of allocating.
const MAX_INDEX_BYTES: usize = 1 << 30;

fn bincode_config() -> Configuration<LittleEndian, Varint, Limit<MAX_INDEX_BYTES>> {
    standard().with_limit::<MAX_INDEX_BYTES>()
}

/// On-disk envelope for [`FlatIndex`].
#[derive(Encode, Decode)]
struct IndexFile {
    version: u32,
    index: FlatIndex,
}

impl FlatIndex {
    /// Serialized format version; bump when the layout changes.
    pub const VERSION: u32 = 1;

    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            data: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored vectors.
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The vector stored at `position`.
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        self.data.chunks_exact(self.dimension.max(1)).nth(position)
    }

    /// Append `vectors` in order. Either all vectors are added or none.
    pub fn add<V: AsRef<[f32]>>(&mut self, vectors: &[V]) -> Result<()> {
        if let Some(bad) = vectors
            .iter()
            .map(AsRef::as_ref)
            .find(|v| v.len() != self.dimension)
        {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: bad.len(),
            });
        }
        self.data.reserve(vectors.len() * self.dimension);
        for vector in vectors {
            self.data.extend_from_slice(vector.as_ref());
        }
        Ok(())
    }

    /// Return up to `k` nearest vectors by squared Euclidean distance,
    /// ascending. Equal distances are ordered by position.
    ///
    /// When `k` exceeds the number of stored vectors, every vector is
    /// returned; the result is never padded.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dimension {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }
        let mut hits: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(index, vector)| Neighbor {
                index,
                distance: squared_l2(query, vector),
            })
            .collect();
        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.index.cmp(&b.index))
        });
        hits.truncate(k);
        Ok(hits)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let file = IndexFile {
            version: Self::VERSION,
            index: self.clone(),
        };
        encode_to_vec(&file, bincode_config())
            .map_err(|e| RagError::CacheCorrupt(format!("failed to serialize index: {e}")))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (file, consumed): (IndexFile, usize) = decode_from_slice(bytes, bincode_config())
            .map_err(|e| RagError::CacheCorrupt(format!("failed to deserialize index: {e}")))?;
        if consumed != bytes.len() {
            return Err(RagError::CacheCorrupt(format!(
                "{} trailing bytes after index",
                bytes.len() - consumed
            )));
        }
        if file.version != Self::VERSION {
            return Err(RagError::CacheCorrupt(format!(
                "index format version {} (expected {})",
                file.version,
                Self::VERSION
            )));
        }
        let index = file.index;
        let misaligned = match index.dimension {
            0 => !index.data.is_empty(),
            dim => index.data.len() % dim != 0,
        };
        if misaligned {
            return Err(RagError::CacheCorrupt(format!(
                "{} values do not divide into vectors of dimension {}",
                index.data.len(),
                index.dimension
            )));
        }
        Ok(index)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
