use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use incomescan_core::{ScanConfig, TextBackend};

// Re-export domain types for convenience
pub use incomescan_core::{AggregateSummary, DocumentType, ExtractionResult, IncomeRecord, aggregate};

/// Extensions routed to the OCR backend.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp"];

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported file type: .{extension}")]
    UnsupportedFormat { extension: String },
    #[error("extraction error: {0}")]
    Backend(#[from] incomescan_core::BackendError),
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of incomescan-ingest)")]
    NoPdfSupport,
    #[cfg(not(feature = "ocr"))]
    #[error("OCR support not compiled in (enable the `ocr` feature of incomescan-ingest)")]
    NoOcrSupport,
}

/// Process a single document: extract text, classify, extract income fields.
///
/// Dispatches to a backend based on the lowercased file extension:
/// - `.pdf` → digital text layer (confidence 1.0)
/// - `.png`, `.jpg`, `.jpeg`, `.tiff`, `.bmp` → OCR (engine score / 100)
/// - anything else → [`IngestError::UnsupportedFormat`], without reading
///   the file at all
pub fn process_document(
    path: &Path,
    config: &ScanConfig,
) -> Result<ExtractionResult, IngestError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => extract_pdf(path),
        ext if IMAGE_EXTENSIONS.contains(&ext) => extract_image(path, config),
        _ => Err(IngestError::UnsupportedFormat { extension }),
    }
}

/// Run the post-dispatch pipeline against an explicit backend.
///
/// This is the seam used by tests and embedders that bring their own
/// [`TextBackend`]; [`process_document`] only adds extension dispatch on
/// top of it.
pub fn process_document_with_backend(
    path: &Path,
    backend: &dyn TextBackend,
) -> Result<ExtractionResult, IngestError> {
    let extraction = backend.extract_text(path)?;
    let document_type = incomescan_parsing::classify(&extraction.text);
    let fields = incomescan_parsing::extract_fields(&extraction.text, document_type);
    debug!(
        path = %path.display(),
        document_type = %document_type,
        confidence = extraction.confidence,
        "document processed"
    );
    Ok(ExtractionResult {
        text: extraction.text,
        confidence: extraction.confidence,
        document_type,
        fields,
    })
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<ExtractionResult, IngestError> {
    let backend = incomescan_pdf_mupdf::MupdfBackend::new();
    process_document_with_backend(path, &backend)
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(_path: &Path) -> Result<ExtractionResult, IngestError> {
    Err(IngestError::NoPdfSupport)
}

#[cfg(feature = "ocr")]
fn extract_image(path: &Path, config: &ScanConfig) -> Result<ExtractionResult, IngestError> {
    let backend = incomescan_ocr_tesseract::TesseractBackend::new(&config.ocr_language);
    process_document_with_backend(path, &backend)
}

#[cfg(not(feature = "ocr"))]
fn extract_image(_path: &Path, _config: &ScanConfig) -> Result<ExtractionResult, IngestError> {
    Err(IngestError::NoOcrSupport)
}

/// Process a batch of documents strictly one at a time.
///
/// Never fails: a per-document error is logged and replaced by
/// [`ExtractionResult::error_sentinel`], so the output always has the same
/// length and order as the input. Backends acquire and release their engine
/// within each call, so a failure on one document cannot leak state into
/// the next.
pub fn process_batch(paths: &[PathBuf], config: &ScanConfig) -> Vec<ExtractionResult> {
    process_batch_with_progress(paths, config, |_, _| {})
}

/// [`process_batch`] with a per-document callback, invoked after each
/// document completes (successfully or as a sentinel) with its index.
pub fn process_batch_with_progress(
    paths: &[PathBuf],
    config: &ScanConfig,
    mut progress: impl FnMut(usize, &ExtractionResult),
) -> Vec<ExtractionResult> {
    let mut results = Vec::with_capacity(paths.len());

    for (index, path) in paths.iter().enumerate() {
        let result = match process_document(path, config) {
            Ok(result) => {
                if !result.is_error() && result.confidence < config.low_confidence_warn {
                    warn!(
                        path = %path.display(),
                        confidence = result.confidence,
                        "low extraction confidence"
                    );
                }
                result
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "document failed, continuing batch");
                ExtractionResult::error_sentinel()
            }
        };
        progress(index, &result);
        results.push(result);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_is_rejected_without_io() {
        // The path does not exist; dispatch must fail on the extension alone.
        let err = process_document(
            Path::new("/nonexistent/notes.docx"),
            &ScanConfig::default(),
        )
        .unwrap_err();
        match err {
            IngestError::UnsupportedFormat { extension } => assert_eq!(extension, "docx"),
            other => panic!("expected UnsupportedFormat, got {other}"),
        }
    }

    #[test]
    fn extension_matching_ignores_case() {
        let err = process_document(Path::new("/nonexistent/file.DOCX"), &ScanConfig::default())
            .unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));

        // .PDF routes to the PDF backend, which then fails on the missing
        // file rather than on the extension.
        let err = process_document(Path::new("/nonexistent/file.PDF"), &ScanConfig::default())
            .unwrap_err();
        assert!(matches!(err, IngestError::Backend(_)));
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let err =
            process_document(Path::new("/nonexistent/README"), &ScanConfig::default()).unwrap_err();
        match err {
            IngestError::UnsupportedFormat { extension } => assert_eq!(extension, ""),
            other => panic!("expected UnsupportedFormat, got {other}"),
        }
    }
}
