//! Figures: a grid of panels plus figure-level text, rendered to a raster.
//!
//! Sizes are given in inches and fonts in points; `dpi` converts both to
//! pixels. Saving crops the rendered canvas to its drawn content plus a
//! small pad, so labels placed near or past the figure edge are kept.

mod axes;
mod legend;
mod panel;

pub use axes::{every_nth, Axes, Line2D, SizedText};
pub use legend::{LegendEntry, LegendLocation, LegendOptions};

use std::path::Path;

use batuta_common::display::WithDimensions;
use log::{debug, trace};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::layout::{panel_rects, GridPosition, PanelGrid, Spacing, SubplotMargins};
use crate::output::{write_image, ImageFormat};
use crate::render::{draw_text_aligned, HAlign, Orientation, TextStyle, VAlign};
use crate::scale::{padded, union};

use panel::{draw_panel, PanelFrame};

/// Default resolution in dots per inch.
pub const DEFAULT_DPI: f32 = 100.0;

/// Fraction of the data range added on each side of an axis.
pub const AXIS_MARGIN: f64 = 0.05;

/// Pad around the content of a tight crop, in inches.
const TIGHT_PAD_IN: f32 = 0.1;

/// Blank border rendered around the figure so overhanging text survives.
const CANVAS_MARGIN_IN: f32 = 0.75;

// ============================================================================
// Figure Size
// ============================================================================

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
pub struct FigureSize {
    /// Width in inches.
    pub width: f32,
    /// Height in inches.
    pub height: f32,
}

impl FigureSize {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A square size.
    #[must_use]
    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    /// Size in pixels at `dpi`, rounded.
    #[must_use]
    pub fn pixels(&self, dpi: f32) -> (u32, u32) {
        (
            (self.width * dpi).round().max(0.0) as u32,
            (self.height * dpi).round().max(0.0) as u32,
        )
    }
}

// ============================================================================
// Figure Text
// ============================================================================

/// Text placed at figure-fraction coordinates.
///
/// `(0, 0)` is the bottom-left corner of the figure and `(1, 1)` the top-right.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureText {
    /// Content.
    pub text: String,
    /// Horizontal position as a fraction of the figure width.
    pub x: f32,
    /// Vertical position as a fraction of the figure height, from the bottom.
    pub y: f32,
    /// Font size in points.
    pub size: f32,
    /// Reading direction.
    pub orientation: Orientation,
    /// Horizontal anchoring.
    pub h_align: HAlign,
    /// Vertical anchoring.
    pub v_align: VAlign,
}

impl FigureText {
    /// Horizontal text centered on `(x, y)`.
    #[must_use]
    pub fn new(text: impl Into<String>, x: f32, y: f32, size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            orientation: Orientation::Horizontal,
            h_align: HAlign::Center,
            v_align: VAlign::Center,
        }
    }

    /// Read bottom to top.
    #[must_use]
    pub fn vertical(mut self) -> Self {
        self.orientation = Orientation::Vertical;
        self
    }

    /// Set the anchoring.
    #[must_use]
    pub fn align(mut self, h: HAlign, v: VAlign) -> Self {
        self.h_align = h;
        self.v_align = v;
        self
    }
}

// ============================================================================
// Figure
// ============================================================================

/// A grid of [`Axes`] with shared-axis settings and figure-level text.
#[derive(Debug, Clone)]
pub struct Figure {
    size: FigureSize,
    dpi: f32,
    grid: PanelGrid,
    axes: Vec<Axes>,
    spacing: Spacing,
    margins: SubplotMargins,
    share_x: bool,
    share_y: bool,
    tight: bool,
    background: Rgba,
    texts: Vec<FigureText>,
}

impl Figure {
    /// Create a figure with one empty panel per grid cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the size or dpi is not
    /// positive and finite, or the pixel size rounds to zero.
    pub fn new(grid: PanelGrid, size: FigureSize, dpi: f32) -> Result<Self> {
        let (w, h) = size.pixels(dpi);
        let finite = size.width.is_finite() && size.height.is_finite() && dpi.is_finite();
        if !finite || size.width <= 0.0 || size.height <= 0.0 || dpi <= 0.0 || w == 0 || h == 0 {
            return Err(Error::InvalidDimensions { width: w, height: h });
        }

        debug!("new {}x{} figure, {w}x{h} px at {dpi} dpi", grid.rows(), grid.cols());
        Ok(Self {
            size,
            dpi,
            grid,
            axes: vec![Axes::new(); grid.panel_count()],
            spacing: Spacing::default(),
            margins: SubplotMargins::default(),
            share_x: false,
            share_y: false,
            tight: true,
            background: Rgba::WHITE,
            texts: Vec::new(),
        })
    }

    /// Set the gaps between panels.
    #[must_use]
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the region the panel grid occupies.
    #[must_use]
    pub fn with_margins(mut self, margins: SubplotMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Share axis ranges across panels.
    ///
    /// A shared x axis labels ticks only on the bottom row; a shared y axis
    /// only in the first column.
    #[must_use]
    pub fn with_sharing(mut self, share_x: bool, share_y: bool) -> Self {
        self.share_x = share_x;
        self.share_y = share_y;
        self
    }

    /// Crop the output to its content (on by default).
    #[must_use]
    pub fn with_tight_bbox(mut self, tight: bool) -> Self {
        self.tight = tight;
        self
    }

    /// The panel grid.
    #[must_use]
    pub const fn grid(&self) -> PanelGrid {
        self.grid
    }

    /// Size in inches.
    #[must_use]
    pub const fn size(&self) -> FigureSize {
        self.size
    }

    /// Resolution.
    #[must_use]
    pub const fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Uncropped size in pixels.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        self.size.pixels(self.dpi)
    }

    /// Whether x and y ranges are shared.
    #[must_use]
    pub const fn sharing(&self) -> (bool, bool) {
        (self.share_x, self.share_y)
    }

    /// Panel at `pos`.
    #[must_use]
    pub fn axes(&self, pos: GridPosition) -> Option<&Axes> {
        self.grid.index(pos).and_then(|i| self.axes.get(i))
    }

    /// Mutable panel at `pos`.
    pub fn axes_mut(&mut self, pos: GridPosition) -> Option<&mut Axes> {
        self.grid.index(pos).and_then(|i| self.axes.get_mut(i))
    }

    /// Every panel with its position, row-major.
    pub fn panels(&self) -> impl Iterator<Item = (GridPosition, &Axes)> + '_ {
        self.grid.positions().zip(self.axes.iter())
    }

    /// Add figure-level text.
    pub fn text(&mut self, text: FigureText) {
        self.texts.push(text);
    }

    /// Figure-level texts in insertion order.
    #[must_use]
    pub fn texts(&self) -> &[FigureText] {
        &self.texts
    }

    /// Total number of lines across all panels.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.axes.iter().map(|a| a.lines().len()).sum()
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas cannot be allocated.
    pub fn render(&self) -> Result<Framebuffer> {
        let (w, h) = self.pixel_size();
        let margin = (CANVAS_MARGIN_IN * self.dpi).round() as u32;
        let mut fb = Framebuffer::new(w + 2 * margin, h + 2 * margin)?;
        fb.clear(self.background);

        let area = Rect::new(margin as f32, margin as f32, w as f32, h as f32);
        let rects = panel_rects(self.grid, area, self.margins, self.spacing);

        let shared_x = self.axes.iter().map(Axes::x_extent).fold(None, union);
        let shared_y = self.axes.iter().map(Axes::y_extent).fold(None, union);

        for ((pos, ax), rect) in self.panels().zip(rects) {
            let x_extent = if self.share_x { shared_x } else { ax.x_extent() };
            let y_extent = if self.share_y { shared_y } else { ax.y_extent() };
            let frame = PanelFrame {
                rect,
                x_domain: padded(x_extent, AXIS_MARGIN),
                y_domain: padded(y_extent, AXIS_MARGIN),
                x_tick_labels: !self.share_x || pos.row + 1 == self.grid.rows(),
                y_tick_labels: !self.share_y || pos.col == 0,
            };
            trace!("panel {pos:?}: {} lines, x {:?}, y {:?}", ax.lines().len(), frame.x_domain, frame.y_domain);
            draw_panel(&mut fb, ax, &frame, self.dpi)?;
        }

        for text in &self.texts {
            let at = Point::new(area.x + text.x * area.width, area.y + (1.0 - text.y) * area.height);
            let mut style = TextStyle::from_points(text.size, self.dpi);
            style.orientation = text.orientation;
            draw_text_aligned(&mut fb, at, &text.text, &style, text.h_align, text.v_align);
        }

        if self.tight {
            self.crop_to_content(&fb, area)
        } else {
            fb.crop(margin, margin, w, h)
        }
    }

    fn crop_to_content(&self, fb: &Framebuffer, area: Rect) -> Result<Framebuffer> {
        let Some((x0, y0, x1, y1)) = fb.content_bounds(self.background) else {
            return fb.crop(area.x as u32, area.y as u32, area.width as u32, area.height as u32);
        };
        let pad = (TIGHT_PAD_IN * self.dpi).round() as u32;
        let (x0, y0) = (x0.saturating_sub(pad), y0.saturating_sub(pad));
        let x1 = (x1 + pad).min(fb.width());
        let y1 = (y1 + pad).min(fb.height());
        trace!("tight crop to {}x{}", x1 - x0, y1 - y0);
        fb.crop(x0, y0, x1 - x0, y1 - y0)
    }

    /// Render and write to `path`; the extension picks the format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] before rendering if the
    /// extension is unknown, or an error if rendering or I/O fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let fb = self.render()?;
        debug!("saving {}x{} {format:?} to {}", fb.width(), fb.height(), path.display());
        write_image(&fb, path, self.dpi)
    }
}

impl WithDimensions for Figure {
    /// Resize to `width` x `height` pixels at the current dpi.
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.size = FigureSize::new(width as f32 / self.dpi, height as f32 / self.dpi);
    }
}

impl Drop for Figure {
    fn drop(&mut self) {
        trace!("releasing figure with {} panels", self.axes.len());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_figure(share: bool) -> Figure {
        let grid = PanelGrid::new(2, 2).unwrap();
        let mut fig = Figure::new(grid, FigureSize::square(4.0), 50.0)
            .unwrap()
            .with_sharing(share, share);
        let x = [0.0, 1.0, 2.0];
        fig.axes_mut(GridPosition::new(0, 0)).unwrap().plot(&x, &[0.0, 1.0, 2.0], Some("a")).unwrap();
        fig.axes_mut(GridPosition::new(1, 1)).unwrap().plot(&x, &[10.0, 20.0, 30.0], Some("b")).unwrap();
        fig
    }

    #[test]
    fn test_new_validates_size() {
        let grid = PanelGrid::single();
        assert!(Figure::new(grid, FigureSize::square(0.0), 100.0).is_err());
        assert!(Figure::new(grid, FigureSize::new(5.0, f32::NAN), 100.0).is_err());
        assert!(Figure::new(grid, FigureSize::square(5.0), 0.0).is_err());
        let fig = Figure::new(grid, FigureSize::square(5.0), 100.0).unwrap();
        assert_eq!(fig.pixel_size(), (500, 500));
    }

    #[test]
    fn test_axes_lookup() {
        let fig = sample_figure(true);
        assert_eq!(fig.panels().count(), 4);
        assert_eq!(fig.line_count(), 2);
        assert!(fig.axes(GridPosition::new(0, 1)).unwrap().is_empty());
        assert!(fig.axes(GridPosition::new(2, 0)).is_none());
    }

    #[test]
    fn test_render_untight_matches_pixel_size() {
        let fig = sample_figure(false).with_tight_bbox(false);
        let fb = fig.render().unwrap();
        assert_eq!((fb.width(), fb.height()), (200, 200));
    }

    #[test]
    fn test_tight_crop_keeps_overhanging_text() {
        let plain = sample_figure(true).render().unwrap();
        let mut fig = sample_figure(true);
        fig.text(FigureText::new("X", 0.5, -0.2, 12.0));
        let tight = fig.render().unwrap();

        // The text sits below the figure edge and still makes it into the crop.
        assert!(tight.height() > plain.height());
        assert!(tight.height() > fig.pixel_size().1);
    }

    #[test]
    fn test_tight_crop_pads_content() {
        let fig = sample_figure(false);
        let fb = fig.render().unwrap();
        let (x0, y0, x1, y1) = fb.content_bounds(Rgba::WHITE).unwrap();
        assert_eq!(x0, 5);
        assert_eq!(y0, 5);
        assert_eq!(fb.width() - x1, 5);
        assert_eq!(fb.height() - y1, 5);
    }

    #[test]
    fn test_save_rejects_unknown_extension_before_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fig.tiff");
        assert!(matches!(sample_figure(true).save(&path), Err(Error::UnsupportedFormat(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_png_and_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let fig = sample_figure(true);
        fig.save(dir.path().join("fig.png")).unwrap();
        fig.save(dir.path().join("fig.jpg")).unwrap();
        let png = std::fs::read(dir.path().join("fig.png")).unwrap();
        let jpg = std::fs::read(dir.path().join("fig.jpg")).unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
        assert_eq!(&jpg[..2], &[0xFF, 0xD8]);
    }

    fn blank_figure() -> Figure {
        Figure::new(PanelGrid::single(), FigureSize::square(2.0), 100.0)
            .unwrap()
            .with_tight_bbox(false)
    }

    #[test]
    fn test_margins_move_panel_frame() {
        let default = blank_figure().render().unwrap();
        assert_eq!(default.get_pixel(100, 100), Some(Rgba::WHITE));

        let margins = SubplotMargins {
            left: 0.5,
            right: 0.9,
            bottom: 0.1,
            top: 0.9,
        };
        let moved = blank_figure().with_margins(margins).render().unwrap();
        assert_eq!(moved.get_pixel(100, 100), Some(Rgba::BLACK));
        assert_eq!(moved.get_pixel(140, 20), Some(Rgba::BLACK));
        assert_eq!(moved.get_pixel(50, 100), Some(Rgba::WHITE));
    }

    #[test]
    fn test_text_alignment_anchors_run() {
        let inked_left_of_center = |text: FigureText| {
            let mut fig = blank_figure();
            fig.text(text);
            let fb = fig.render().unwrap();
            (60..100u32)
                .flat_map(|x| (90..111u32).map(move |y| (x, y)))
                .filter(|&(x, y)| fb.get_pixel(x, y) != Some(Rgba::WHITE))
                .count()
        };

        let centered = FigureText::new("XXXX", 0.5, 0.5, 20.0);
        let left = FigureText::new("XXXX", 0.5, 0.5, 20.0).align(HAlign::Left, VAlign::Center);
        assert!(inked_left_of_center(centered) > 0);
        assert_eq!(inked_left_of_center(left), 0);
    }

    #[test]
    fn test_set_dimensions_keeps_dpi() {
        let mut fig = Figure::new(PanelGrid::single(), FigureSize::square(5.0), 100.0).unwrap();
        fig.set_dimensions(300, 200);
        assert_eq!(fig.pixel_size(), (300, 200));
        assert_eq!(fig.dpi(), 100.0);
    }
}
