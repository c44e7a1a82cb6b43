use std::path::Path;

use tesseract::Tesseract;
use tracing::debug;

use incomescan_core::{BackendError, TextBackend, TextExtraction};

/// Tesseract-based implementation of [`TextBackend`] for scanned images.
///
/// Recognition is lossy: alongside the text, the engine's mean confidence
/// is reported, rescaled from its native 0-100 range to `[0, 1]`.
///
/// A fresh engine is initialized for every call and dropped when the call
/// returns, success or failure, so recognition state never leaks between
/// documents and a failure on one image cannot corrupt the next.
pub struct TesseractBackend {
    language: String,
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }
}

impl TesseractBackend {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }
}

impl TextBackend for TesseractBackend {
    fn extract_text(&self, path: &Path) -> Result<TextExtraction, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let engine = Tesseract::new(None, Some(&self.language))
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut engine = engine
            .set_image(path_str)
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        let text = engine
            .get_text()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        // Native score is 0-100; negative means nothing was recognized.
        let mean_conf = engine.mean_text_conf();
        let confidence = f64::from(mean_conf.max(0)) / 100.0;
        debug!(path = %path.display(), mean_conf, "recognition finished");

        Ok(TextExtraction { text, confidence })
    }
}
