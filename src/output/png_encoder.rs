//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const METERS_PER_INCH: f32 = 0.0254;

/// PNG encoder for framebuffer output.
///
/// Pixels are written as 8-bit RGBA and the resolution is recorded in a
/// `pHYs` chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PngEncoder {
    dpi: f32,
}

impl PngEncoder {
    /// Encoder that tags images with `dpi`.
    #[must_use]
    pub const fn new(dpi: f32) -> Self {
        Self { dpi }
    }

    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(fb, BufWriter::new(file))
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(&self, fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(fb, &mut buffer)?;
        Ok(buffer)
    }

    fn write_to<W: Write>(&self, fb: &Framebuffer, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let ppm = (self.dpi / METERS_PER_INCH).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        // Use compact pixels to handle stride padding
        writer.write_image_data(&fb.to_compact_pixels())?;
        writer.finish()?;

        Ok(())
    }
}
