/// Deterministic stand-in for a remote embedding model.
///
/// Component 0 encodes the first character, so texts with different first
/// characters never share an embedding. The remaining components are a
/// normalized character histogram, which keeps texts with similar content
/// close together.
#[allow(clippy::cast_precision_loss)]
pub fn hashed_embedding(text: &str, dimension: usize) -> Vec<f32> {
    assert!(dimension >= 2, "fake embeddings need at least 2 dimensions");
    let mut vector = vec![0.0_f32; dimension];
    vector[0] = text.chars().next().map_or(0.0, |c| c as u32 as f32 / 65536.0);

    let buckets = dimension - 1;
    let mut total = 0_u32;
    for ch in text.chars() {
        vector[1 + (ch as u32 as usize) % buckets] += 1.0;
        total += 1;
    }
    if total > 0 {
        for value in &mut vector[1..] {
            *value /= total as f32;
        }
    }
    vector
}
