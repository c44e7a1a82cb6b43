use std::path::Path;

use mupdf::{Document, TextPageFlags};

use incomescan_core::{BackendError, TextBackend, TextExtraction};

/// MuPDF-based implementation of [`TextBackend`] for digital PDFs.
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// (which is AGPL-3.0) so that non-PDF code paths do not transitively
/// depend on it.
///
/// The embedded text layer is read directly, with no rasterization and no
/// recognition step, so the extracted text is exact: confidence is fixed
/// at 1.0 on success. Corrupt, zero-length, or password-protected files
/// fail with an [`BackendError::OpenError`].
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl TextBackend for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<TextExtraction, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        if document
            .needs_password()
            .map_err(|e| BackendError::OpenError(e.to_string()))?
        {
            return Err(BackendError::OpenError(
                "document is password protected".into(),
            ));
        }

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            // Use block/line iteration so line breaks survive extraction;
            // the field extractors anchor name captures on line boundaries.
            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        Ok(TextExtraction {
            text: pages_text.join("\n"),
            confidence: 1.0,
        })
    }
}
