use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::image_loader::ImageLoadError;

#[derive(Debug, Error)]
pub enum DqsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profiling error: {0}")]
    Profiling(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl DqsError {
    pub fn config(message: impl Into<String>) -> Self {
        DqsError::Config(message.into())
    }

    pub fn profiling(message: impl Into<String>) -> Self {
        DqsError::Profiling(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            DqsError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            DqsError::Image(e) => ErrorPayload::new(
                ErrorCategory::Image,
                e.to_string(),
                "Verify screenshot path/format and readability.",
            ),
            DqsError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check manifest/aggregate JSON inputs; run with --verbose for details.",
            ),
            DqsError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("weight") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Metric weights must sum to 1.0 within each category, and category weights to 1.0 overall.",
                    )
                } else if lower.contains("level cut") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Level cut points must be strictly increasing (e.g. 40 < 60 < 80).",
                    )
                } else if lower.contains("manifest") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check the manifest path and that it is a JSON document with a `designs` array.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check rubric values and file paths; CLI flags override config.",
                    )
                }
            }
            DqsError::Profiling(msg) => ErrorPayload::new(
                ErrorCategory::Profiling,
                msg.to_string(),
                "Inspect the design's inputs; rerun with --verbose.",
            ),
            DqsError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

impl From<ImageLoadError> for DqsError {
    fn from(err: ImageLoadError) -> Self {
        match err {
            ImageLoadError::Load(e) => DqsError::Image(e),
            ImageLoadError::NotFound(path) => {
                DqsError::Config(format!("File not found: {}", path))
            }
            ImageLoadError::UnsupportedExtension(ext) => DqsError::Config(format!(
                "Unsupported file extension '{}'. Supported image extensions: png, jpg, jpeg, webp, gif, bmp, tiff.",
                ext
            )),
        }
    }
}

pub type Result<T> = std::result::Result<T, DqsError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Io,
    Image,
    Profiling,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
