/// First code point used by [`distinct_text`] (CJK Unified Ideographs).
const DISTINCT_BASE: u32 = 0x4E00;

/// A text of `len` characters in which no character repeats.
///
/// Useful for checking chunk boundaries: every window of the text is unique.
pub fn distinct_text(len: usize) -> String {
    assert!(len <= 20_000, "distinct_text supports up to 20000 characters");
    (DISTINCT_BASE..)
        .take(len)
        .filter_map(char::from_u32)
        .collect()
}
