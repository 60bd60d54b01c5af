//! Output encoders (PNG, JPEG).

mod jpeg_encoder;
mod png_encoder;

pub use jpeg_encoder::{JpegEncoder, DEFAULT_QUALITY};
pub use png_encoder::PngEncoder;

use std::path::Path;

use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;

/// Raster formats a figure can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Lossless PNG with alpha.
    Png,
    /// JPEG, flattened onto white.
    Jpeg,
}

impl ImageFormat {
    /// Format implied by the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for a missing or unknown extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Canonical file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Encode `fb` to `path` in the format its extension names, overwriting any
/// existing file.
///
/// # Errors
///
/// Returns an error for an unknown extension, or if encoding or I/O fails.
pub fn write_image(fb: &Framebuffer, path: &Path, dpi: f32) -> Result<()> {
    match ImageFormat::from_path(path)? {
        ImageFormat::Png => PngEncoder::new(dpi).write_to_file(fb, path),
        ImageFormat::Jpeg => JpegEncoder::new(dpi).write_to_file(fb, path),
    }
}
