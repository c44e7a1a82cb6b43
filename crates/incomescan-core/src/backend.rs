use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text produced by a backend together with its confidence.
///
/// `confidence` is in `[0, 1]`: a digital text layer is exact (1.0); an OCR
/// backend reports the recognizer's own score rescaled from its native
/// 0-100 range.
#[derive(Debug, Clone)]
pub struct TextExtraction {
    pub text: String,
    pub confidence: f64,
}

/// Trait for text extraction backends.
///
/// Implementors provide the low-level text extraction step; classification
/// and field extraction live in `incomescan-parsing`, and extension-based
/// dispatch between backends lives in `incomescan-ingest`.
pub trait TextBackend: Send + Sync {
    /// Extract the full text content of a document file.
    fn extract_text(&self, path: &Path) -> Result<TextExtraction, BackendError>;
}
