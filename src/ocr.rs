//! OCR (Optical Character Recognition) boundary for extracting text blocks
//! from screenshots.
//!
//! Text extraction uses Tesseract via the `leptess` crate and is consumed as
//! a black-box capability: given pixels, return candidate text regions with
//! bounding boxes and confidence. Batch manifests may also carry text blocks
//! directly, in which case this module is bypassed.
//!
//! # Feature Flag
//!
//! This module requires the `ocr` feature flag to be enabled:
//!
//! ```toml
//! [dependencies]
//! dqs = { version = "0.1", features = ["ocr"] }
//! ```
//!
//! # System Requirements
//!
//! - Tesseract OCR must be installed on the system
//! - The `tessdata` directory must be accessible (typically at
//!   `/usr/share/tesseract-ocr/tessdata` or set via `TESSDATA_PREFIX`)

use std::path::Path;

use thiserror::Error;

use crate::types::TextBlock;
#[cfg(feature = "ocr")]
use crate::types::BoundingBox;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Failed to initialize OCR engine: {0}")]
    InitError(String),
    #[error("Failed to load image for OCR: {0}")]
    ImageLoadError(String),
    #[error("Tesseract not available - install Tesseract OCR or enable the 'ocr' feature")]
    NotAvailable,
}

/// Options for OCR text extraction.
#[derive(Debug, Clone)]
pub struct OcrOptions {
    /// Language code for Tesseract (default: "eng")
    pub language: String,
    /// Minimum confidence for including a token (0-100).
    pub min_confidence: f32,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            min_confidence: 30.0,
        }
    }
}

/// Extract text blocks from an image using OCR.
///
/// Returns token-level [`TextBlock`]s with confidence on the 0-100 scale and
/// the token box height as the font-size proxy.
#[cfg(feature = "ocr")]
pub fn extract_text_blocks(
    image_path: &Path,
    options: &OcrOptions,
) -> Result<Vec<TextBlock>, OcrError> {
    use leptess::LepTess;

    let mut lt = LepTess::new(None, &options.language)
        .map_err(|e| OcrError::InitError(format!("{:?}", e)))?;

    lt.set_image(image_path)
        .map_err(|e| OcrError::ImageLoadError(format!("{:?}", e)))?;

    let mut blocks = Vec::new();
    let boxes = lt.get_component_boxes(leptess::capi::TessPageIteratorLevel_RIL_WORD, true);

    for b in boxes {
        lt.set_rectangle(b.x, b.y, b.w as i32, b.h as i32);

        let text = lt.get_utf8_text().unwrap_or_default();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }

        let confidence = lt.mean_text_conf() as f32;
        if confidence < options.min_confidence {
            continue;
        }

        blocks.push(TextBlock {
            text: trimmed.to_string(),
            confidence,
            size: b.h as f32,
            position: BoundingBox {
                x: b.x as f32,
                y: b.y as f32,
                width: b.w as f32,
                height: b.h as f32,
            },
        });
    }

    Ok(blocks)
}

/// Stub implementation when OCR feature is disabled.
#[cfg(not(feature = "ocr"))]
pub fn extract_text_blocks(
    _image_path: &Path,
    _options: &OcrOptions,
) -> Result<Vec<TextBlock>, OcrError> {
    Err(OcrError::NotAvailable)
}

/// Check if OCR is available in this build.
#[inline]
pub const fn is_available() -> bool {
    cfg!(feature = "ocr")
}

#[cfg(all(test, feature = "ocr"))]
mod tests {
    use super::*;

    #[test]
    fn extract_nonexistent_file_errors() {
        let result = extract_text_blocks(Path::new("/nonexistent/image.png"), &OcrOptions::default());
        assert!(result.is_err());
    }
}
