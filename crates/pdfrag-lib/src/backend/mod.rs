pub mod gemini;

use crate::error::Result;

/// The two remote model capabilities the pipeline depends on.
///
/// Both calls block until the service answers. Implementations own any
/// timeout or retry policy; the pipeline never retries.
pub trait ModelBackend {
    /// Embed one text into a fixed-dimension vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate an answer for a fully rendered prompt.
    fn generate(&self, prompt: &str) -> Result<String>;
}

impl<B: ModelBackend + ?Sized> ModelBackend for &B {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt)
    }
}
