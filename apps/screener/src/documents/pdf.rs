use std::path::Path;

use tracing::debug;

use super::DocumentError;

/// Concatenates the text of every page in order. Pages without extractable
/// text contribute nothing.
pub(super) fn extract_text(path: &Path, bytes: &[u8]) -> Result<String, DocumentError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| DocumentError::extraction(path, e.to_string()))?;

    debug!("Extracted {} PDF pages from {}", pages.len(), path.display());
    Ok(join_pages(pages))
}

fn join_pages(pages: Vec<String>) -> String {
    pages.concat()
}
