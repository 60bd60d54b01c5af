//! Panel grids and series placement.
//!
//! A figure's panels form a `rows x cols` grid addressed in row-major order.
//! Series are assigned to panels by a single linear rule: series `i` goes to
//! panel `i / group_size`, which sits at row `panel / cols` and column
//! `panel % cols`. A group size of one gives one series per panel. The same
//! rule covers single-row, single-column and full two-dimensional grids.

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Shape of a panel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGrid {
    rows: usize,
    cols: usize,
}

impl PanelGrid {
    /// Create a grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGrid`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// The 1x1 grid.
    #[must_use]
    pub const fn single() -> Self {
        Self { rows: 1, cols: 1 }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of panels.
    #[must_use]
    pub const fn panel_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Position of the `panel`-th panel in row-major order.
    #[must_use]
    pub fn position(&self, panel: usize) -> Option<GridPosition> {
        (panel < self.panel_count()).then(|| GridPosition {
            row: panel / self.cols,
            col: panel % self.cols,
        })
    }

    /// Row-major index of a position.
    #[must_use]
    pub fn index(&self, pos: GridPosition) -> Option<usize> {
        (pos.row < self.rows && pos.col < self.cols).then(|| pos.row * self.cols + pos.col)
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + '_ {
        (0..self.panel_count()).filter_map(|i| self.position(i))
    }
}

/// A `(row, col)` panel address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    /// Zero-based row, counted from the top.
    pub row: usize,
    /// Zero-based column, counted from the left.
    pub col: usize,
}

impl GridPosition {
    /// Create a position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row-major cursor that hands out the panel for each successive series.
///
/// The cursor stays on a panel until `group_size` series have been placed
/// there, then moves one column right, wrapping to the next row.
#[derive(Debug, Clone)]
pub struct GridCursor {
    grid: PanelGrid,
    group_size: usize,
    placed: usize,
}

impl GridCursor {
    /// Cursor placing `group_size` series per panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGroupSize`] if `group_size` is zero.
    pub fn grouped(grid: PanelGrid, group_size: usize) -> Result<Self> {
        if group_size == 0 {
            return Err(Error::InvalidGroupSize);
        }
        Ok(Self {
            grid,
            group_size,
            placed: 0,
        })
    }

    /// Cursor placing one series per panel.
    #[must_use]
    pub fn per_series(grid: PanelGrid) -> Self {
        Self {
            grid,
            group_size: 1,
            placed: 0,
        }
    }

    /// Panel for series `index`, independent of the cursor state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridExhausted`] if the series falls past the last panel.
    pub fn placement(&self, index: usize) -> Result<GridPosition> {
        self.grid
            .position(index / self.group_size)
            .ok_or(Error::GridExhausted {
                series: index,
                rows: self.grid.rows,
                cols: self.grid.cols,
            })
    }

    /// Panel for the next series; advances the cursor on success.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridExhausted`] once every panel is full.
    pub fn advance(&mut self) -> Result<GridPosition> {
        let pos = self.placement(self.placed)?;
        self.placed += 1;
        Ok(pos)
    }

    /// Number of series placed so far.
    #[must_use]
    pub const fn placed(&self) -> usize {
        self.placed
    }

    /// Series placed so far in the current panel.
    #[must_use]
    pub const fn in_current_panel(&self) -> usize {
        self.placed % self.group_size
    }

    /// The grid being walked.
    #[must_use]
    pub const fn grid(&self) -> PanelGrid {
        self.grid
    }
}

/// Gaps between panels as fractions of the mean panel width/height.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct Spacing {
    /// Horizontal gap.
    pub wspace: f32,
    /// Vertical gap.
    pub hspace: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            wspace: 0.2,
            hspace: 0.2,
        }
    }
}

impl Spacing {
    /// Equal horizontal and vertical gaps.
    #[must_use]
    pub const fn uniform(space: f32) -> Self {
        Self {
            wspace: space,
            hspace: space,
        }
    }
}

/// Figure-fraction edges of the region the panel grid occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubplotMargins {
    /// Left edge.
    pub left: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge (fraction from the bottom).
    pub bottom: f32,
    /// Top edge (fraction from the bottom).
    pub top: f32,
}

impl Default for SubplotMargins {
    fn default() -> Self {
        Self {
            left: 0.125,
            right: 0.9,
            bottom: 0.11,
            top: 0.88,
        }
    }
}

/// Pixel rectangles of every panel of `grid`, row-major, for a figure that
/// occupies `figure` on the canvas.
#[must_use]
pub fn panel_rects(grid: PanelGrid, figure: Rect, margins: SubplotMargins, spacing: Spacing) -> Vec<Rect> {
    let x0 = figure.x + margins.left * figure.width;
    let y0 = figure.y + (1.0 - margins.top) * figure.height;
    let total_w = (margins.right - margins.left) * figure.width;
    let total_h = (margins.top - margins.bottom) * figure.height;

    let cols = grid.cols as f32;
    let rows = grid.rows as f32;
    let cell_w = total_w / (cols + spacing.wspace * (cols - 1.0));
    let cell_h = total_h / (rows + spacing.hspace * (rows - 1.0));
    let gap_w = spacing.wspace * cell_w;
    let gap_h = spacing.hspace * cell_h;

    grid.positions()
        .map(|pos| {
            Rect::new(
                x0 + pos.col as f32 * (cell_w + gap_w),
                y0 + pos.row as f32 * (cell_h + gap_h),
                cell_w,
                cell_h,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_grid() {
        assert!(matches!(PanelGrid::new(0, 3), Err(Error::InvalidGrid { rows: 0, cols: 3 })));
        assert!(PanelGrid::new(2, 0).is_err());
    }

    #[test]
    fn test_row_major_per_series() {
        let grid = PanelGrid::new(2, 3).unwrap();
        let mut cursor = GridCursor::per_series(grid);
        let placed: Vec<_> = (0..5).map(|_| cursor.advance().unwrap()).collect();

        assert_eq!(
            placed,
            vec![
                GridPosition::new(0, 0),
                GridPosition::new(0, 1),
                GridPosition::new(0, 2),
                GridPosition::new(1, 0),
                GridPosition::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_single_row_and_single_column() {
        let row = GridCursor::per_series(PanelGrid::new(1, 3).unwrap());
        assert_eq!(row.placement(2).unwrap(), GridPosition::new(0, 2));

        let col = GridCursor::per_series(PanelGrid::new(3, 1).unwrap());
        assert_eq!(col.placement(2).unwrap(), GridPosition::new(2, 0));
    }

    #[test]
    fn test_grouped_advances_after_group() {
        let mut cursor = GridCursor::grouped(PanelGrid::new(1, 2).unwrap(), 2).unwrap();
        let placed: Vec<_> = (0..4).map(|_| cursor.advance().unwrap()).collect();

        assert_eq!(placed[0], GridPosition::new(0, 0));
        assert_eq!(placed[1], GridPosition::new(0, 0));
        assert_eq!(placed[2], GridPosition::new(0, 1));
        assert_eq!(placed[3], GridPosition::new(0, 1));
        assert_eq!(cursor.in_current_panel(), 0);
    }

    #[test]
    fn test_grouped_wraps_rows() {
        let cursor = GridCursor::grouped(PanelGrid::new(2, 2).unwrap(), 3).unwrap();
        assert_eq!(cursor.placement(5).unwrap(), GridPosition::new(0, 1));
        assert_eq!(cursor.placement(6).unwrap(), GridPosition::new(1, 0));
        assert_eq!(cursor.placement(11).unwrap(), GridPosition::new(1, 1));
        assert!(cursor.placement(12).is_err());
    }

    #[test]
    fn test_exhausted_grid() {
        let mut cursor = GridCursor::per_series(PanelGrid::new(1, 2).unwrap());
        cursor.advance().unwrap();
        cursor.advance().unwrap();

        match cursor.advance() {
            Err(Error::GridExhausted { series, rows, cols }) => {
                assert_eq!((series, rows, cols), (2, 1, 2));
            }
            other => panic!("expected GridExhausted, got {other:?}"),
        }
        // A failed advance leaves the cursor where it was.
        assert_eq!(cursor.placed(), 2);
    }

    #[test]
    fn test_zero_group_size() {
        assert!(matches!(
            GridCursor::grouped(PanelGrid::single(), 0),
            Err(Error::InvalidGroupSize)
        ));
    }

    #[test]
    fn test_grid_index_roundtrip() {
        let grid = PanelGrid::new(3, 4).unwrap();
        for (i, pos) in grid.positions().enumerate() {
            assert_eq!(grid.index(pos), Some(i));
        }
        assert_eq!(grid.index(GridPosition::new(3, 0)), None);
    }

    #[test]
    fn test_panel_rects_single() {
        let rects = panel_rects(
            PanelGrid::single(),
            Rect::new(0.0, 0.0, 500.0, 500.0),
            SubplotMargins::default(),
            Spacing::default(),
        );
        assert_eq!(rects.len(), 1);
        assert_relative_eq!(rects[0].x, 62.5);
        assert_relative_eq!(rects[0].y, 60.0, epsilon = 1e-3);
        assert_relative_eq!(rects[0].width, 387.5, epsilon = 1e-3);
        assert_relative_eq!(rects[0].height, 385.0, epsilon = 1e-3);
    }

    #[test]
    fn test_panel_rects_spacing() {
        let rects = panel_rects(
            PanelGrid::new(2, 2).unwrap(),
            Rect::new(0.0, 0.0, 700.0, 700.0),
            SubplotMargins::default(),
            Spacing::uniform(0.4),
        );
        assert_eq!(rects.len(), 4);

        // Same row shares y, same column shares x.
        assert_relative_eq!(rects[0].y, rects[1].y, epsilon = 1e-3);
        assert_relative_eq!(rects[0].x, rects[2].x, epsilon = 1e-3);

        // Gap is 0.4 of a panel width.
        let gap = rects[1].x - rects[0].right();
        assert_relative_eq!(gap, 0.4 * rects[0].width, epsilon = 1e-3);

        // Last panel ends on the right margin.
        assert_relative_eq!(rects[3].right(), 0.9 * 700.0, epsilon = 1e-2);
    }
}
