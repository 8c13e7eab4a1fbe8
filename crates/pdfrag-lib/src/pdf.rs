use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{RagError, Result};

/// Extract the text of every page of the PDF at `path`, joined with `"\n"`.
///
/// Pages without extractable text (scanned images, blank pages) contribute an
/// empty string rather than an error.
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| RagError::DocumentRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let pages =
        pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| RagError::DocumentRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    debug!(path = %path.display(), page_count = pages.len(), "Extracted PDF pages");
    Ok(join_pages(&pages))
}

/// Join per-page text in page order with a single newline between pages.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}
