//! Panel legends: placement keywords, layout and drawing.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::render::{blend_rect, draw_rect_outline, draw_stroke, draw_text_aligned, HAlign, TextStyle, VAlign};

// Spacing in units of the legend font size.
const BORDER_PAD: f32 = 0.4;
const LABEL_SPACING: f32 = 0.5;
const HANDLE_LENGTH: f32 = 2.0;
const HANDLE_TEXT_PAD: f32 = 0.8;
const COLUMN_SPACING: f32 = 2.0;
const BORDER_AXES_PAD: f32 = 0.5;

/// Where a legend sits inside its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub enum LegendLocation {
    /// The candidate location covering the fewest data points.
    #[default]
    #[cfg_attr(feature = "config", serde(rename = "best"))]
    Best,
    /// Top-right corner.
    #[cfg_attr(feature = "config", serde(rename = "upper right"))]
    UpperRight,
    /// Top-left corner.
    #[cfg_attr(feature = "config", serde(rename = "upper left"))]
    UpperLeft,
    /// Bottom-left corner.
    #[cfg_attr(feature = "config", serde(rename = "lower left"))]
    LowerLeft,
    /// Bottom-right corner.
    #[cfg_attr(feature = "config", serde(rename = "lower right"))]
    LowerRight,
    /// Right edge, vertically centered.
    #[cfg_attr(feature = "config", serde(rename = "right"))]
    Right,
    /// Left edge, vertically centered.
    #[cfg_attr(feature = "config", serde(rename = "center left"))]
    CenterLeft,
    /// Right edge, vertically centered.
    #[cfg_attr(feature = "config", serde(rename = "center right"))]
    CenterRight,
    /// Bottom edge, horizontally centered.
    #[cfg_attr(feature = "config", serde(rename = "lower center"))]
    LowerCenter,
    /// Top edge, horizontally centered.
    #[cfg_attr(feature = "config", serde(rename = "upper center"))]
    UpperCenter,
    /// Panel center.
    #[cfg_attr(feature = "config", serde(rename = "center"))]
    Center,
}

impl LegendLocation {
    /// Concrete locations tried by [`LegendLocation::Best`], in tie-break order.
    pub const CANDIDATES: [Self; 10] = [
        Self::UpperRight,
        Self::UpperLeft,
        Self::LowerLeft,
        Self::LowerRight,
        Self::Right,
        Self::CenterLeft,
        Self::CenterRight,
        Self::LowerCenter,
        Self::UpperCenter,
        Self::Center,
    ];

    /// Keyword for this location.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::UpperRight => "upper right",
            Self::UpperLeft => "upper left",
            Self::LowerLeft => "lower left",
            Self::LowerRight => "lower right",
            Self::Right => "right",
            Self::CenterLeft => "center left",
            Self::CenterRight => "center right",
            Self::LowerCenter => "lower center",
            Self::UpperCenter => "upper center",
            Self::Center => "center",
        }
    }

    /// Top-left corner of a `size` box at this location inside `area`.
    ///
    /// [`LegendLocation::Best`] is treated as upper right; resolve it with
    /// [`best_location`] first.
    #[must_use]
    pub fn anchor(self, area: Rect, size: (f32, f32), pad: f32) -> Point {
        let (w, h) = size;
        let left = area.x + pad;
        let right = area.right() - pad - w;
        let hmid = area.center().x - w / 2.0;
        let top = area.y + pad;
        let bottom = area.bottom() - pad - h;
        let vmid = area.center().y - h / 2.0;

        let (x, y) = match self {
            Self::Best | Self::UpperRight => (right, top),
            Self::UpperLeft => (left, top),
            Self::LowerLeft => (left, bottom),
            Self::LowerRight => (right, bottom),
            Self::Right | Self::CenterRight => (right, vmid),
            Self::CenterLeft => (left, vmid),
            Self::LowerCenter => (hmid, bottom),
            Self::UpperCenter => (hmid, top),
            Self::Center => (hmid, vmid),
        };
        Point::new(x, y)
    }
}

impl fmt::Display for LegendLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegendLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        std::iter::once(Self::Best)
            .chain(Self::CANDIDATES)
            .find(|loc| loc.as_str() == key)
            .ok_or_else(|| Error::InvalidLegendLocation(s.to_string()))
    }
}

/// Legend appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct LegendOptions {
    /// Number of entry columns.
    pub columns: usize,
    /// Entry font size in points.
    pub font_size: f32,
    /// Placement keyword.
    pub location: LegendLocation,
}

impl Default for LegendOptions {
    fn default() -> Self {
        Self {
            columns: 1,
            font_size: 10.0,
            location: LegendLocation::Best,
        }
    }
}

/// One legend row: a line sample and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Series label.
    pub label: String,
    /// Line color.
    pub color: Rgba,
}

/// Column-major split of `count` entries over `columns` columns; the first
/// `count % columns` columns take one extra entry.
fn column_spans(count: usize, columns: usize) -> Vec<Range<usize>> {
    let columns = columns.clamp(1, count.max(1));
    let (base, extra) = (count / columns, count % columns);
    let mut start = 0;
    (0..columns)
        .map(|col| {
            let len = base + usize::from(col < extra);
            let span = start..start + len;
            start += len;
            span
        })
        .collect()
}

/// A legend laid out for a given font size and dpi.
#[derive(Debug, Clone)]
pub(crate) struct LegendBox {
    entries: Vec<LegendEntry>,
    style: TextStyle,
    rows: usize,
    spans: Vec<Range<usize>>,
    col_widths: Vec<f32>,
    em: f32,
    line_h: f32,
}

impl LegendBox {
    pub(crate) fn layout(entries: Vec<LegendEntry>, options: &LegendOptions, dpi: f32) -> Self {
        let style = TextStyle::from_points(options.font_size, dpi);
        let em = options.font_size * dpi / 72.0;
        let spans = column_spans(entries.len(), options.columns);
        let rows = spans.iter().map(|span| span.len()).max().unwrap_or(0).max(1);

        let col_widths = spans
            .iter()
            .map(|span| {
                let text_w = entries[span.clone()]
                    .iter()
                    .map(|e| style.measure(&e.label).0)
                    .max()
                    .unwrap_or(0) as f32;
                (HANDLE_LENGTH + HANDLE_TEXT_PAD) * em + text_w
            })
            .collect();

        let line_h = (style.line_height() as f32).max(0.7 * em);

        Self {
            entries,
            style,
            rows,
            spans,
            col_widths,
            em,
            line_h,
        }
    }

    pub(crate) fn size(&self) -> (f32, f32) {
        let cols = self.col_widths.len() as f32;
        let w = 2.0 * BORDER_PAD * self.em
            + self.col_widths.iter().sum::<f32>()
            + (cols - 1.0).max(0.0) * COLUMN_SPACING * self.em;
        let rows = self.rows as f32;
        let h = 2.0 * BORDER_PAD * self.em + rows * self.line_h + (rows - 1.0) * LABEL_SPACING * self.em;
        (w, h)
    }

    pub(crate) fn pad(&self) -> f32 {
        BORDER_AXES_PAD * self.em
    }

    pub(crate) fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Frame rectangle for a concrete location inside `area`.
    pub(crate) fn frame(&self, location: LegendLocation, area: Rect) -> Rect {
        let size = self.size();
        let at = location.anchor(area, size, self.pad());
        Rect::new(at.x, at.y, size.0, size.1)
    }

    pub(crate) fn draw(&self, fb: &mut Framebuffer, frame: Rect, line_width: f32) {
        let (fx, fy) = (frame.x.round().max(0.0) as u32, frame.y.round().max(0.0) as u32);
        let (fw, fh) = (frame.width.round() as u32, frame.height.round() as u32);
        blend_rect(fb, fx, fy, fw, fh, Rgba::WHITE.with_alpha(204));
        draw_rect_outline(fb, fx as i32, fy as i32, fw, fh, Rgba::LEGEND_EDGE, 1);

        let mut col_x = frame.x + BORDER_PAD * self.em;
        for (span, width) in self.spans.iter().zip(&self.col_widths) {
            for (row, entry) in self.entries[span.clone()].iter().enumerate() {
                let cy = frame.y
                    + BORDER_PAD * self.em
                    + row as f32 * (self.line_h + LABEL_SPACING * self.em)
                    + self.line_h / 2.0;
                let handle_end = col_x + HANDLE_LENGTH * self.em;
                draw_stroke(fb, Point::new(col_x, cy), Point::new(handle_end, cy), line_width, entry.color);

                let text_at = Point::new(handle_end + HANDLE_TEXT_PAD * self.em, cy);
                draw_text_aligned(fb, text_at, &entry.label, &self.style, HAlign::Left, VAlign::Center);
            }
            col_x += width + COLUMN_SPACING * self.em;
        }
    }
}

/// Resolve [`LegendLocation::Best`] to the candidate whose frame covers the
/// fewest polyline vertices and segments; ties go to the earliest candidate.
pub(crate) fn best_location(legend: &LegendBox, area: Rect, polylines: &[Vec<Point>]) -> LegendLocation {
    let mut best = LegendLocation::UpperRight;
    let mut best_cost = usize::MAX;

    for loc in LegendLocation::CANDIDATES {
        let frame = legend.frame(loc, area);
        let cost: usize = polylines
            .iter()
            .map(|pts| {
                let vertices = pts.iter().filter(|p| frame.contains(**p)).count();
                let segments = pts
                    .windows(2)
                    .filter(|s| segment_hits_rect(s[0], s[1], frame))
                    .count();
                vertices + segments
            })
            .sum();

        if cost < best_cost {
            best = loc;
            best_cost = cost;
        }
        if cost == 0 {
            break;
        }
    }

    best
}

/// Whether the segment `a-b` touches the rectangle.
fn segment_hits_rect(a: Point, b: Point, rect: Rect) -> bool {
    if rect.contains(a) || rect.contains(b) {
        return true;
    }
    let corners = [
        Point::new(rect.x, rect.y),
        Point::new(rect.right(), rect.y),
        Point::new(rect.right(), rect.bottom()),
        Point::new(rect.x, rect.bottom()),
    ];
    (0..4).any(|i| segments_cross(a, b, corners[i], corners[(i + 1) % 4]))
}

fn segments_cross(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let orient = |a: Point, b: Point, c: Point| (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);
    (d1 * d2 < 0.0) && (d3 * d4 < 0.0)
}
