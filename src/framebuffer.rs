//! RGBA pixel canvas that figures are rasterized into.
//!
//! Rows are padded to a 64-byte stride. Alpha flattening for opaque outputs
//! goes through trueno vectors so it picks up the best SIMD backend available.

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::Vector;

/// Row alignment in bytes.
const SIMD_ALIGNMENT: usize = 64;

/// Pixel bounds `(x0, y0, x1, y1)`, end-exclusive.
pub type Bounds = (u32, u32, u32, u32);

/// Stride-aligned RGBA framebuffer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// RGBA pixels in row-major order, `stride` bytes per row.
    pixels: Vec<u8>,
    stride: usize,
}

impl Framebuffer {
    /// Create a new, fully transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_panels::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);

        Ok(Self {
            width,
            height,
            pixels: vec![0; stride * (height as usize)],
            stride,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Get a row of pixels as a slice (without stride padding).
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * self.stride;
        Some(&self.pixels[start..start + (self.width as usize) * 4])
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        self.fill_rect(0, 0, self.width, self.height, color);
    }

    /// Fill a rectangular region with a solid color.
    ///
    /// Coordinates are clamped to framebuffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let rgba = color.to_array();
        let span = (x2 - x1) as usize * 4;

        for row_y in y1..y2 {
            let start = (row_y as usize) * self.stride + (x1 as usize) * 4;
            for chunk in self.pixels[start..start + span].chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Blend a color over the pixel at `(x, y)` ("over" compositing).
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height || color.a == 0 {
            return;
        }

        let idx = self.pixel_index(x, y);
        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let blend = |src: u8, dst: u8| -> u8 {
            let out = (f32::from(src) * src_a + f32::from(dst) * dst_a * (1.0 - src_a)) / out_a;
            out.round().clamp(0.0, 255.0) as u8
        };

        self.pixels[idx] = blend(color.r, self.pixels[idx]);
        self.pixels[idx + 1] = blend(color.g, self.pixels[idx + 1]);
        self.pixels[idx + 2] = blend(color.b, self.pixels[idx + 2]);
        self.pixels[idx + 3] = (out_a * 255.0).round() as u8;
    }

    /// Smallest box containing every pixel that differs from `background`.
    ///
    /// Returns `None` for a blank canvas.
    #[must_use]
    pub fn content_bounds(&self, background: Rgba) -> Option<Bounds> {
        let bg = background.to_array();
        let mut bounds: Option<Bounds> = None;

        for y in 0..self.height {
            let Some(row) = self.row(y) else { continue };
            let mut cols = row
                .chunks_exact(4)
                .enumerate()
                .filter(|(_, px)| px[..] != bg[..])
                .map(|(x, _)| x as u32);

            let Some(first) = cols.next() else { continue };
            let last = cols.last().unwrap_or(first);

            bounds = Some(match bounds {
                None => (first, y, last + 1, y + 1),
                Some((x0, y0, x1, _)) => (x0.min(first), y0, x1.max(last + 1), y + 1),
            });
        }

        bounds
    }

    /// Copy a sub-region into a new framebuffer.
    ///
    /// The region is clamped to the framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the clamped region is empty.
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Self> {
        let x0 = x.min(self.width);
        let y0 = y.min(self.height);
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);

        let mut out = Self::new(x1.saturating_sub(x0), y1.saturating_sub(y0))?;
        let span = (out.width as usize) * 4;

        for row_y in 0..out.height {
            let src = ((y0 + row_y) as usize) * self.stride + (x0 as usize) * 4;
            let dst = (row_y as usize) * out.stride;
            out.pixels[dst..dst + span].copy_from_slice(&self.pixels[src..src + span]);
        }

        Ok(out)
    }

    /// Get pixel data as a tightly packed RGBA buffer.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;
        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));
        for y in 0..self.height {
            let start = (y as usize) * self.stride;
            compact.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        compact
    }

    /// Get pixel data as packed RGB, compositing alpha over `background`.
    ///
    /// Each row is blended with trueno vectors: `out = bg + alpha * (src - bg)`.
    #[must_use]
    pub fn to_rgb_over(&self, background: Rgba) -> Vec<u8> {
        let bg = [f32::from(background.r), f32::from(background.g), f32::from(background.b)];
        let row_len = (self.width as usize) * 3;
        let bg_row = Vector::from_vec(bg.iter().copied().cycle().take(row_len).collect::<Vec<f32>>());

        let mut rgb = Vec::with_capacity(self.pixel_count() * 3);
        for y in 0..self.height {
            let Some(row) = self.row(y) else { continue };
            let mut src = Vec::with_capacity(row_len);
            let mut alpha = Vec::with_capacity(row_len);
            for chunk in row.chunks_exact(4) {
                let a = f32::from(chunk[3]) / 255.0;
                src.extend(chunk[..3].iter().map(|&c| f32::from(c)));
                alpha.extend([a; 3]);
            }

            let blended = Vector::from_vec(src)
                .sub(&bg_row)
                .and_then(|diff| diff.mul(&Vector::from_vec(alpha)))
                .and_then(|scaled| scaled.add(&bg_row));
            match blended {
                Ok(out) => rgb.extend(out.as_slice().iter().map(|v| v.round().clamp(0.0, 255.0) as u8)),
                Err(_) => {
                    for chunk in row.chunks_exact(4) {
                        let px = Rgba::new(chunk[0], chunk[1], chunk[2], chunk[3]);
                        rgb.extend_from_slice(&px.flatten_over(background));
                    }
                }
            }
        }
        rgb
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_framebuffer() {
        let fb = Framebuffer::new(100, 50).unwrap();
        assert_eq!(fb.width(), 100);
        assert_eq!(fb.height(), 50);
        assert_eq!(fb.pixel_count(), 5000);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Framebuffer::new(0, 100).is_err());
        assert!(Framebuffer::new(100, 0).is_err());
    }

    #[test]
    fn test_clear_and_fill_rect() {
        let mut fb = Framebuffer::new(100, 100).unwrap();
        fb.clear(Rgba::WHITE);
        fb.fill_rect(10, 10, 20, 20, Rgba::RED);

        assert_eq!(fb.get_pixel(15, 15), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(99, 99), Some(Rgba::WHITE));
    }

    #[test]
    fn test_fill_rect_clamps() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.fill_rect(5, 5, u32::MAX, u32::MAX, Rgba::RED);
        assert_eq!(fb.get_pixel(9, 9), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(4, 4), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_set_get_pixel_out_of_bounds() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.set_pixel(100, 100, Rgba::BLUE);
        assert_eq!(fb.get_pixel(100, 100), None);
    }

    #[test]
    fn test_blend_pixel() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);
        fb.blend_pixel(5, 5, Rgba::new(255, 0, 0, 128));

        let result = fb.get_pixel(5, 5).unwrap();
        assert!(result.r > 200);
        assert!(result.g > 100 && result.g < 150);
        assert_eq!(result.a, 255);
    }

    #[test]
    fn test_content_bounds() {
        let mut fb = Framebuffer::new(50, 40).unwrap();
        fb.clear(Rgba::WHITE);
        assert_eq!(fb.content_bounds(Rgba::WHITE), None);

        fb.set_pixel(10, 5, Rgba::BLACK);
        fb.set_pixel(30, 20, Rgba::BLACK);
        assert_eq!(fb.content_bounds(Rgba::WHITE), Some((10, 5, 31, 21)));
    }

    #[test]
    fn test_crop() {
        let mut fb = Framebuffer::new(50, 40).unwrap();
        fb.clear(Rgba::WHITE);
        fb.set_pixel(12, 7, Rgba::RED);

        let cropped = fb.crop(10, 5, 10, 10).unwrap();
        assert_eq!(cropped.width(), 10);
        assert_eq!(cropped.height(), 10);
        assert_eq!(cropped.get_pixel(2, 2), Some(Rgba::RED));

        assert!(fb.crop(60, 60, 5, 5).is_err());
    }

    #[test]
    fn test_to_rgb_over() {
        let mut fb = Framebuffer::new(2, 1).unwrap();
        fb.set_pixel(0, 0, Rgba::RED);
        let rgb = fb.to_rgb_over(Rgba::WHITE);
        assert_eq!(rgb, vec![255, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_to_rgb_over_matches_scalar_flatten() {
        let mut fb = Framebuffer::new(3, 2).unwrap();
        let samples = [
            Rgba::BLACK.with_alpha(128),
            Rgba::new(31, 119, 180, 200),
            Rgba::new(255, 127, 14, 1),
        ];
        for (x, px) in samples.iter().enumerate() {
            fb.set_pixel(x as u32, 1, *px);
        }

        let rgb = fb.to_rgb_over(Rgba::WHITE);
        assert_eq!(rgb.len(), 3 * 2 * 3);
        assert!(rgb[..9].iter().all(|&c| c == 255));
        for (x, px) in samples.iter().enumerate() {
            let at = 9 + x * 3;
            let expected = px.flatten_over(Rgba::WHITE);
            for (got, want) in rgb[at..at + 3].iter().zip(expected) {
                assert!(got.abs_diff(want) <= 1, "pixel {x}: {got} vs {want}");
            }
        }
    }
}
