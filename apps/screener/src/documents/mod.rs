//! File Reader — turns a CV or job description file into plain text.
//!
//! Dispatch is purely on the file extension. Supported: `.txt`, `.pdf`, `.docx`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::screening::models::ExtractedDocument;

mod docx;
mod pdf;

/// Extensions accepted by [`read_document`], without the leading dot.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["txt", "pdf", "docx"];

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from {path}: {message}")]
    Extraction { path: PathBuf, message: String },
}

impl DocumentError {
    pub(crate) fn extraction(path: &Path, message: impl Into<String>) -> Self {
        DocumentError::Extraction {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Text,
    Pdf,
    Docx,
}

/// Lower-cased extension including the leading dot, or `""` when there is none.
fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn detect_format(path: &Path) -> Result<DocumentFormat, DocumentError> {
    match dotted_extension(path).as_str() {
        ".txt" => Ok(DocumentFormat::Text),
        ".pdf" => Ok(DocumentFormat::Pdf),
        ".docx" => Ok(DocumentFormat::Docx),
        other => Err(DocumentError::UnsupportedFileType(other.to_string())),
    }
}

/// Whether `file_name` carries one of the supported extensions.
pub fn is_supported(file_name: &str) -> bool {
    detect_format(Path::new(file_name)).is_ok()
}

/// Reads a document synchronously and returns its text.
///
/// The extension is checked before the file is touched, so an unsupported
/// file type is reported even when the path does not exist.
pub fn read_text(path: &Path) -> Result<String, DocumentError> {
    let format = detect_format(path)?;

    let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        DocumentFormat::Text => String::from_utf8(bytes)
            .map_err(|e| DocumentError::extraction(path, format!("invalid UTF-8: {e}"))),
        DocumentFormat::Pdf => pdf::extract_text(path, &bytes),
        DocumentFormat::Docx => docx::extract_text(path, &bytes),
    }
}

/// Reads a document on the blocking pool and packages it as an [`ExtractedDocument`].
pub async fn read_document(path: &Path) -> Result<ExtractedDocument, DocumentError> {
    let owned = path.to_path_buf();
    let file_content = tokio::task::spawn_blocking(move || read_text(&owned))
        .await
        .map_err(|e| DocumentError::extraction(path, format!("reader task failed: {e}")))??;

    Ok(ExtractedDocument {
        file_path: path.to_path_buf(),
        file_content,
    })
}
