//! JPEG output encoder.
//!
//! JPEG has no alpha channel, so pixels are flattened over a background
//! color before encoding.

use image::codecs::jpeg::{JpegEncoder as ImageJpegEncoder, PixelDensity};
use image::ExtendedColorType;

use crate::color::Rgba;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 95;

/// JPEG encoder for framebuffer output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JpegEncoder {
    dpi: f32,
    quality: u8,
    background: Rgba,
}

impl JpegEncoder {
    /// Encoder at [`DEFAULT_QUALITY`] that flattens onto white.
    #[must_use]
    pub const fn new(dpi: f32) -> Self {
        Self {
            dpi,
            quality: DEFAULT_QUALITY,
            background: Rgba::WHITE,
        }
    }

    /// Set quality (clamped to 1..=100).
    #[must_use]
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    /// Write a framebuffer to a JPEG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(fb, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Encode a framebuffer to JPEG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_bytes(&self, fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(fb, &mut buffer)?;
        Ok(buffer)
    }

    fn write_to<W: Write>(&self, fb: &Framebuffer, sink: W) -> Result<()> {
        let rgb = fb.to_rgb_over(self.background);
        let density = self.dpi.round().clamp(1.0, f32::from(u16::MAX)) as u16;

        let mut encoder = ImageJpegEncoder::new_with_quality(sink, self.quality);
        encoder.set_pixel_density(PixelDensity::dpi(density));
        encoder.encode(&rgb, fb.width(), fb.height(), ExtendedColorType::Rgb8)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_to_bytes() {
        let mut fb = Framebuffer::new(16, 16).unwrap();
        fb.clear(Rgba::BLUE);

        let bytes = JpegEncoder::new(100.0).to_bytes(&fb).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_quality_clamped() {
        let enc = JpegEncoder::new(72.0).quality(0);
        assert_eq!(enc.quality, 1);
        let enc = JpegEncoder::new(72.0).quality(200);
        assert_eq!(enc.quality, 100);
    }
}
