//! Local screenshot loading.
//!
//! Decoding is the only image I/O the engine performs; capture itself is an
//! external collaborator's job.

use std::path::Path;

use image::DynamicImage;
use thiserror::Error;

const SUPPORTED_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff"];

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Local file not found: {0}")]
    NotFound(String),
    #[error("Unsupported file extension '{0}'")]
    UnsupportedExtension(String),
}

/// Load a design screenshot from disk.
pub fn load_image(path: &Path) -> Result<DynamicImage, ImageLoadError> {
    if !path.exists() {
        return Err(ImageLoadError::NotFound(path.display().to_string()));
    }

    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let lower = ext.to_ascii_lowercase();
        if !SUPPORTED_EXTENSIONS.contains(&lower.as_str()) {
            return Err(ImageLoadError::UnsupportedExtension(lower));
        }
    }

    Ok(image::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_file_reports_not_found() {
        let err = load_image(Path::new("/nonexistent/shot.png")).unwrap_err();
        assert!(matches!(err, ImageLoadError::NotFound(_)));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("design.exr");
        std::fs::write(&path, b"not an image").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, ImageLoadError::UnsupportedExtension(ext) if ext == "exr"));
    }

    #[test]
    fn valid_png_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.png");
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3]));
        img.save(&path).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.width(), 8);
        assert_eq!(loaded.height(), 8);
    }
}
