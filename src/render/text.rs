//! Bitmap text rendering.
//!
//! Labels are drawn with an embedded 5x7 ASCII font, scaled by an integer
//! factor derived from the requested point size. Text can run left-to-right
//! or bottom-to-top (rotated 90 degrees counter-clockwise) for y-axis labels.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

/// Glyph cell width in font pixels (5 columns plus 1 spacing).
const CELL_W: u32 = 6;
/// Glyph height in font pixels.
const GLYPH_H: u32 = 7;
/// Cap height relative to the em size of a typical sans-serif face.
const CAP_HEIGHT_RATIO: f32 = 0.73;

/// Each glyph: 7 rows, lower 5 bits per row, MSB is the leftmost pixel.
/// Covers ASCII 32..=126.
#[rustfmt::skip]
const FONT_5X7: [[u8; 7]; 95] = [
    [0x00,0x00,0x00,0x00,0x00,0x00,0x00], // 32 ' '
    [0x04,0x04,0x04,0x04,0x04,0x00,0x04], // 33 '!'
    [0x0A,0x0A,0x0A,0x00,0x00,0x00,0x00], // 34 '"'
    [0x0A,0x0A,0x1F,0x0A,0x1F,0x0A,0x0A], // 35 '#'
    [0x04,0x0F,0x14,0x0E,0x05,0x1E,0x04], // 36 '$'
    [0x18,0x19,0x02,0x04,0x08,0x13,0x03], // 37 '%'
    [0x0C,0x12,0x14,0x08,0x15,0x12,0x0D], // 38 '&'
    [0x04,0x04,0x08,0x00,0x00,0x00,0x00], // 39 '''
    [0x02,0x04,0x08,0x08,0x08,0x04,0x02], // 40 '('
    [0x08,0x04,0x02,0x02,0x02,0x04,0x08], // 41 ')'
    [0x00,0x04,0x15,0x0E,0x15,0x04,0x00], // 42 '*'
    [0x00,0x04,0x04,0x1F,0x04,0x04,0x00], // 43 '+'
    [0x00,0x00,0x00,0x00,0x00,0x04,0x08], // 44 ','
    [0x00,0x00,0x00,0x1F,0x00,0x00,0x00], // 45 '-'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x04], // 46 '.'
    [0x00,0x01,0x02,0x04,0x08,0x10,0x00], // 47 '/'
    [0x0E,0x11,0x13,0x15,0x19,0x11,0x0E], // 48 '0'
    [0x04,0x0C,0x04,0x04,0x04,0x04,0x0E], // 49 '1'
    [0x0E,0x11,0x01,0x02,0x04,0x08,0x1F], // 50 '2'
    [0x1F,0x02,0x04,0x02,0x01,0x11,0x0E], // 51 '3'
    [0x02,0x06,0x0A,0x12,0x1F,0x02,0x02], // 52 '4'
    [0x1F,0x10,0x1E,0x01,0x01,0x11,0x0E], // 53 '5'
    [0x06,0x08,0x10,0x1E,0x11,0x11,0x0E], // 54 '6'
    [0x1F,0x01,0x02,0x04,0x08,0x08,0x08], // 55 '7'
    [0x0E,0x11,0x11,0x0E,0x11,0x11,0x0E], // 56 '8'
    [0x0E,0x11,0x11,0x0F,0x01,0x02,0x0C], // 57 '9'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x00], // 58 ':'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x08], // 59 ';'
    [0x02,0x04,0x08,0x10,0x08,0x04,0x02], // 60 '<'
    [0x00,0x00,0x1F,0x00,0x1F,0x00,0x00], // 61 '='
    [0x08,0x04,0x02,0x01,0x02,0x04,0x08], // 62 '>'
    [0x0E,0x11,0x01,0x02,0x04,0x00,0x04], // 63 '?'
    [0x0E,0x11,0x17,0x15,0x17,0x10,0x0E], // 64 '@'
    [0x0E,0x11,0x11,0x1F,0x11,0x11,0x11], // 65 'A'
    [0x1E,0x11,0x11,0x1E,0x11,0x11,0x1E], // 66 'B'
    [0x0E,0x11,0x10,0x10,0x10,0x11,0x0E], // 67 'C'
    [0x1C,0x12,0x11,0x11,0x11,0x12,0x1C], // 68 'D'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x1F], // 69 'E'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x10], // 70 'F'
    [0x0E,0x11,0x10,0x17,0x11,0x11,0x0F], // 71 'G'
    [0x11,0x11,0x11,0x1F,0x11,0x11,0x11], // 72 'H'
    [0x0E,0x04,0x04,0x04,0x04,0x04,0x0E], // 73 'I'
    [0x07,0x02,0x02,0x02,0x02,0x12,0x0C], // 74 'J'
    [0x11,0x12,0x14,0x18,0x14,0x12,0x11], // 75 'K'
    [0x10,0x10,0x10,0x10,0x10,0x10,0x1F], // 76 'L'
    [0x11,0x1B,0x15,0x15,0x11,0x11,0x11], // 77 'M'
    [0x11,0x11,0x19,0x15,0x13,0x11,0x11], // 78 'N'
    [0x0E,0x11,0x11,0x11,0x11,0x11,0x0E], // 79 'O'
    [0x1E,0x11,0x11,0x1E,0x10,0x10,0x10], // 80 'P'
    [0x0E,0x11,0x11,0x11,0x15,0x12,0x0D], // 81 'Q'
    [0x1E,0x11,0x11,0x1E,0x14,0x12,0x11], // 82 'R'
    [0x0F,0x10,0x10,0x0E,0x01,0x01,0x1E], // 83 'S'
    [0x1F,0x04,0x04,0x04,0x04,0x04,0x04], // 84 'T'
    [0x11,0x11,0x11,0x11,0x11,0x11,0x0E], // 85 'U'
    [0x11,0x11,0x11,0x11,0x11,0x0A,0x04], // 86 'V'
    [0x11,0x11,0x11,0x15,0x15,0x1B,0x11], // 87 'W'
    [0x11,0x11,0x0A,0x04,0x0A,0x11,0x11], // 88 'X'
    [0x11,0x11,0x0A,0x04,0x04,0x04,0x04], // 89 'Y'
    [0x1F,0x01,0x02,0x04,0x08,0x10,0x1F], // 90 'Z'
    [0x0E,0x08,0x08,0x08,0x08,0x08,0x0E], // 91 '['
    [0x00,0x10,0x08,0x04,0x02,0x01,0x00], // 92 '\'
    [0x0E,0x02,0x02,0x02,0x02,0x02,0x0E], // 93 ']'
    [0x04,0x0A,0x11,0x00,0x00,0x00,0x00], // 94 '^'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x1F], // 95 '_'
    [0x08,0x04,0x02,0x00,0x00,0x00,0x00], // 96 '`'
    [0x00,0x00,0x0E,0x01,0x0F,0x11,0x0F], // 97 'a'
    [0x10,0x10,0x16,0x19,0x11,0x11,0x1E], // 98 'b'
    [0x00,0x00,0x0E,0x10,0x10,0x11,0x0E], // 99 'c'
    [0x01,0x01,0x0D,0x13,0x11,0x11,0x0F], // 100 'd'
    [0x00,0x00,0x0E,0x11,0x1F,0x10,0x0E], // 101 'e'
    [0x06,0x09,0x08,0x1C,0x08,0x08,0x08], // 102 'f'
    [0x00,0x00,0x0F,0x11,0x0F,0x01,0x0E], // 103 'g'
    [0x10,0x10,0x16,0x19,0x11,0x11,0x11], // 104 'h'
    [0x04,0x00,0x0C,0x04,0x04,0x04,0x0E], // 105 'i'
    [0x02,0x00,0x06,0x02,0x02,0x12,0x0C], // 106 'j'
    [0x10,0x10,0x12,0x14,0x18,0x14,0x12], // 107 'k'
    [0x0C,0x04,0x04,0x04,0x04,0x04,0x0E], // 108 'l'
    [0x00,0x00,0x1A,0x15,0x15,0x11,0x11], // 109 'm'
    [0x00,0x00,0x16,0x19,0x11,0x11,0x11], // 110 'n'
    [0x00,0x00,0x0E,0x11,0x11,0x11,0x0E], // 111 'o'
    [0x00,0x00,0x1E,0x11,0x1E,0x10,0x10], // 112 'p'
    [0x00,0x00,0x0D,0x13,0x0F,0x01,0x01], // 113 'q'
    [0x00,0x00,0x16,0x19,0x10,0x10,0x10], // 114 'r'
    [0x00,0x00,0x0E,0x10,0x0E,0x01,0x1E], // 115 's'
    [0x08,0x08,0x1C,0x08,0x08,0x09,0x06], // 116 't'
    [0x00,0x00,0x11,0x11,0x11,0x13,0x0D], // 117 'u'
    [0x00,0x00,0x11,0x11,0x11,0x0A,0x04], // 118 'v'
    [0x00,0x00,0x11,0x11,0x15,0x15,0x0A], // 119 'w'
    [0x00,0x00,0x11,0x0A,0x04,0x0A,0x11], // 120 'x'
    [0x00,0x00,0x11,0x11,0x0F,0x01,0x0E], // 121 'y'
    [0x00,0x00,0x1F,0x02,0x04,0x08,0x1F], // 122 'z'
    [0x02,0x04,0x04,0x08,0x04,0x04,0x02], // 123 '{'
    [0x04,0x04,0x04,0x04,0x04,0x04,0x04], // 124 '|'
    [0x08,0x04,0x04,0x02,0x04,0x04,0x08], // 125 '}'
    [0x00,0x00,0x08,0x15,0x02,0x00,0x00], // 126 '~'
];

/// Reading direction of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Bottom to top.
    Vertical,
}

/// Rendering parameters for a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Integer magnification of the 5x7 font.
    pub scale: u32,
    /// Glyph color.
    pub color: Rgba,
    /// Reading direction.
    pub orientation: Orientation,
}

impl TextStyle {
    /// Style for a font size in points at the given dpi.
    #[must_use]
    pub fn from_points(points: f32, dpi: f32) -> Self {
        let em_px = points * dpi / 72.0;
        let scale = (em_px * CAP_HEIGHT_RATIO / GLYPH_H as f32).round().max(1.0) as u32;
        Self {
            scale,
            color: Rgba::BLACK,
            orientation: Orientation::Horizontal,
        }
    }

    /// Same style, read bottom to top.
    #[must_use]
    pub fn vertical(mut self) -> Self {
        self.orientation = Orientation::Vertical;
        self
    }

    /// Same style with another color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Height of one line of text in pixels (before rotation).
    #[must_use]
    pub fn line_height(&self) -> u32 {
        GLYPH_H * self.scale
    }

    /// Extent of `text` as drawn `(width, height)` in pixels, after rotation.
    #[must_use]
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let chars = text.chars().count() as u32;
        let run = (chars * CELL_W).saturating_sub(1) * self.scale;
        let line = self.line_height();
        match self.orientation {
            Orientation::Horizontal => (run, line),
            Orientation::Vertical => (line, run),
        }
    }

    /// Bounding box of `text` centered on `center`.
    #[must_use]
    pub fn centered_box(&self, text: &str, center: Point) -> Rect {
        let (w, h) = self.measure(text);
        Rect::new(
            center.x - w as f32 / 2.0,
            center.y - h as f32 / 2.0,
            w as f32,
            h as f32,
        )
    }
}

/// Horizontal anchoring of a text run relative to its reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    /// Reference point is the left edge.
    Left,
    /// Reference point is the horizontal center.
    Center,
    /// Reference point is the right edge.
    Right,
}

/// Vertical anchoring of a text run relative to its reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    /// Reference point is the top edge.
    Top,
    /// Reference point is the vertical center.
    Center,
    /// Reference point is the bottom edge.
    Bottom,
}

/// Draw `text` with its top-left corner (after rotation) at `(x, y)`.
pub fn draw_text(fb: &mut Framebuffer, x: i32, y: i32, text: &str, style: &TextStyle) {
    let advance = (CELL_W * style.scale) as i32;
    let (_, run_h) = style.measure(text);

    for (i, ch) in text.chars().enumerate() {
        let offset = i as i32 * advance;
        match style.orientation {
            Orientation::Horizontal => draw_glyph(fb, x + offset, y, ch, style),
            // The first glyph sits at the bottom of the run.
            Orientation::Vertical => draw_glyph(fb, x, y + run_h as i32 - offset, ch, style),
        }
    }
}

/// Draw `text` anchored at `at` with the given alignment; returns the box it covers.
pub fn draw_text_aligned(
    fb: &mut Framebuffer,
    at: Point,
    text: &str,
    style: &TextStyle,
    h: HAlign,
    v: VAlign,
) -> Rect {
    let (w, hgt) = style.measure(text);
    let x = match h {
        HAlign::Left => at.x,
        HAlign::Center => at.x - w as f32 / 2.0,
        HAlign::Right => at.x - w as f32,
    };
    let y = match v {
        VAlign::Top => at.y,
        VAlign::Center => at.y - hgt as f32 / 2.0,
        VAlign::Bottom => at.y - hgt as f32,
    };

    draw_text(fb, x.round() as i32, y.round() as i32, text, style);
    Rect::new(x, y, w as f32, hgt as f32)
}

/// Glyph bitmap for a character; anything outside printable ASCII is `?`.
fn glyph(ch: char) -> &'static [u8; 7] {
    let code = ch as u32;
    let index = if (32..=126).contains(&code) { code - 32 } else { u32::from(b'?') - 32 };
    &FONT_5X7[index as usize]
}

/// Draw one glyph. For vertical text `(x, y)` is the bottom-left of the
/// rotated cell, so the glyph baseline runs along the left edge.
fn draw_glyph(fb: &mut Framebuffer, x: i32, y: i32, ch: char, style: &TextStyle) {
    let s = style.scale as i32;

    for (row, &bits) in glyph(ch).iter().enumerate() {
        for col in 0..5 {
            if bits & (0x10 >> col) == 0 {
                continue;
            }
            let (px, py) = match style.orientation {
                Orientation::Horizontal => (x + col * s, y + row as i32 * s),
                Orientation::Vertical => (x + row as i32 * s, y - (col + 1) * s),
            };
            fill_cell(fb, px, py, s, style.color);
        }
    }
}

fn fill_cell(fb: &mut Framebuffer, x: i32, y: i32, size: i32, color: Rgba) {
    if x + size <= 0 || y + size <= 0 {
        return;
    }
    let (cx, cy) = (x.max(0), y.max(0));
    let w = (x + size - cx) as u32;
    let h = (y + size - cy) as u32;
    fb.fill_rect(cx as u32, cy as u32, w, h, color);
}
