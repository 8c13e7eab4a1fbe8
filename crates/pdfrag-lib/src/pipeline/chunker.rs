use crate::config::{CHUNK_OVERLAP, CHUNK_SIZE};
use crate::error::{RagError, Result};

/// Window size and overlap for fixed-length chunking, in characters.
///
/// Only constructible through [`ChunkConfig::new`], which guarantees that each
/// window advances by at least one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    size: usize,
    overlap: usize,
}

impl ChunkConfig {
    pub fn new(size: usize, overlap: usize) -> Result<Self> {
        if size == 0 || overlap >= size {
            return Err(RagError::InvalidChunkConfig { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between the starts of consecutive chunks.
    pub fn step(&self) -> usize {
        self.size - self.overlap
    }

    /// Number of chunks produced for a text of `len` characters.
    pub fn chunk_count(&self, len: usize) -> usize {
        if len == 0 {
            0
        } else if len <= self.overlap {
            1
        } else {
            (len - self.overlap).div_ceil(self.step())
        }
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            size: CHUNK_SIZE,
            overlap: CHUNK_OVERLAP,
        }
    }
}

/// Iterator over the overlapping windows `[start, start + size)` of a text.
///
/// Starts advance by `size - overlap` until a window covers the end of the
/// text. Offsets count Unicode scalar values, so windows never split a
/// character. Cloning the iterator restarts from the clone's position.
#[derive(Debug, Clone)]
pub struct ChunkWindows<'a> {
    text: &'a str,
    /// Byte offset of every character, followed by `text.len()`.
    offsets: Vec<usize>,
    config: ChunkConfig,
    start: usize,
}

impl<'a> ChunkWindows<'a> {
    pub fn new(text: &'a str, config: ChunkConfig) -> Self {
        let offsets = text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            text,
            offsets,
            config,
            start: 0,
        }
    }

    fn char_len(&self) -> usize {
        self.offsets.len() - 1
    }
}

impl<'a> Iterator for ChunkWindows<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.char_len();
        if self.start >= len {
            return None;
        }
        let end = (self.start + self.config.size).min(len);
        let chunk = &self.text[self.offsets[self.start]..self.offsets[end]];
        // A window reaching the end of the text is the last one; a further
        // window would lie entirely inside the overlap.
        self.start = if end == len {
            len
        } else {
            self.start + self.config.step()
        };
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.char_len().saturating_sub(self.start);
        let count = self.config.chunk_count(remaining);
        (count, Some(count))
    }
}

impl ExactSizeIterator for ChunkWindows<'_> {}

/// Split `text` into owned, ordered, overlapping chunks.
///
/// Empty text yields no chunks; text shorter than the window yields exactly
/// one chunk equal to the whole text.
pub fn chunk_text(text: &str, config: ChunkConfig) -> Vec<String> {
    ChunkWindows::new(text, config).map(str::to_string).collect()
}
