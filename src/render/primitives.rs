//! Primitive rendering functions.
//!
//! Rasterization of the strokes a panel is made of: data lines, dashed grid
//! lines, tick marks and frames.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw an anti-aliased line using Wu's algorithm.
///
/// # References
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { dy / dx };

    // First endpoint
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = rfpart(x0 + 0.5);
    let xpxl1 = xend as i32;
    let ypxl1 = yend.floor() as i32;
    plot_pair(fb, steep, xpxl1, ypxl1, yend, xgap, color);

    let mut intery = yend + gradient;

    // Second endpoint
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = fpart(x1 + 0.5);
    let xpxl2 = xend as i32;
    let ypxl2 = yend.floor() as i32;
    plot_pair(fb, steep, xpxl2, ypxl2, yend, xgap, color);

    for x in (xpxl1 + 1)..xpxl2 {
        plot_pair(fb, steep, x, intery.floor() as i32, intery, 1.0, color);
        intery += gradient;
    }
}

/// Plot the two pixels straddling the ideal line at major-axis position `x`.
#[inline]
fn plot_pair(fb: &mut Framebuffer, steep: bool, x: i32, y: i32, exact: f32, gap: f32, color: Rgba) {
    let (near, far) = (rfpart(exact) * gap, fpart(exact) * gap);
    if steep {
        plot(fb, y, x, color, near);
        plot(fb, y + 1, x, color, far);
    } else {
        plot(fb, x, y, color, near);
        plot(fb, x, y + 1, color, far);
    }
}

/// Plot a pixel with intensity (for anti-aliased drawing).
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        let alpha = (f32::from(color.a) * intensity.clamp(0.0, 1.0)) as u8;
        fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
    }
}

#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

/// Draw an anti-aliased stroke of the given width in pixels.
///
/// Wide strokes are built from parallel one-pixel passes spaced along the
/// segment normal.
pub fn draw_stroke(fb: &mut Framebuffer, from: Point, to: Point, width: f32, color: Rgba) {
    let len = from.distance(to);
    if width <= 1.0 || len < f32::EPSILON {
        draw_line_aa(fb, from.x, from.y, to.x, to.y, color);
        return;
    }

    let (nx, ny) = (-(to.y - from.y) / len, (to.x - from.x) / len);
    let passes = width.round().max(1.0) as i32;
    let start = -(passes - 1) as f32 / 2.0;

    for i in 0..passes {
        let off = start + i as f32;
        draw_line_aa(
            fb,
            from.x + nx * off,
            from.y + ny * off,
            to.x + nx * off,
            to.y + ny * off,
            color,
        );
    }
}

/// Draw a connected sequence of strokes.
pub fn draw_polyline(fb: &mut Framebuffer, points: &[Point], width: f32, color: Rgba) {
    for pair in points.windows(2) {
        draw_stroke(fb, pair[0], pair[1], width, color);
    }
}

// ============================================================================
// Dashed Lines
// ============================================================================

/// On/off dash lengths in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    /// Painted run length.
    pub on: u32,
    /// Gap length.
    pub off: u32,
}

impl Dash {
    /// Dash pattern for a `--` line of `linewidth_px`, scaled like the
    /// classic 3.7/1.6 dashed style and never shorter than one pixel.
    #[must_use]
    pub fn scaled(linewidth_px: f32) -> Self {
        Self {
            on: (3.7 * linewidth_px).round().max(2.0) as u32,
            off: (1.6 * linewidth_px).round().max(1.0) as u32,
        }
    }

    fn is_on(self, step: u32) -> bool {
        step % (self.on + self.off) < self.on
    }
}

/// Draw a dashed horizontal line from `x0` to `x1` (inclusive) at row `y`.
pub fn draw_dashed_hline(fb: &mut Framebuffer, x0: u32, x1: u32, y: u32, dash: Dash, color: Rgba) {
    for x in x0..=x1 {
        if dash.is_on(x - x0) {
            fb.blend_pixel(x, y, color);
        }
    }
}

/// Draw a dashed vertical line from `y0` to `y1` (inclusive) at column `x`.
pub fn draw_dashed_vline(fb: &mut Framebuffer, x: u32, y0: u32, y1: u32, dash: Dash, color: Rgba) {
    for y in y0..=y1 {
        if dash.is_on(y - y0) {
            fb.blend_pixel(x, y, color);
        }
    }
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;
    fb.fill_rect(x, y, width, height, color);
}

/// Draw a rectangle outline.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    color: Rgba,
    thickness: u32,
) {
    let thickness = thickness.max(1);
    let x = x.max(0) as u32;
    let y = y.max(0) as u32;

    // Top, bottom
    fb.fill_rect(x, y, width, thickness, color);
    if height > thickness {
        fb.fill_rect(x, y + height - thickness, width, thickness, color);
    }
    // Left, right
    if height > 2 * thickness {
        fb.fill_rect(x, y + thickness, thickness, height - 2 * thickness, color);
        if width > thickness {
            fb.fill_rect(
                x + width - thickness,
                y + thickness,
                thickness,
                height - 2 * thickness,
                color,
            );
        }
    }
}

/// Fill a rectangle by blending a translucent color over the existing pixels.
pub fn blend_rect(fb: &mut Framebuffer, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
    for py in y..y.saturating_add(height).min(fb.height()) {
        for px in x..x.saturating_add(width).min(fb.width()) {
            fb.blend_pixel(px, py, color);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
