//! One series per panel, walked row-major across the grid.

use log::debug;

use crate::data::SeriesTable;
use crate::error::Result;
use crate::figure::{every_nth, Figure, FigureSize, FigureText, DEFAULT_DPI};
use crate::layout::{GridCursor, PanelGrid, Spacing};

use super::{next_panel, render_to, warn_undrawn, OutputPath, PanelStyle};

/// Options for [`plot_each`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct EachOptions {
    /// Label every n-th x value.
    pub x_tick_interval: usize,
    /// Shared x title size in points.
    pub x_label_size: f32,
    /// Per-panel y title size in points.
    pub y_label_size: f32,
    /// X tick label size in points.
    pub x_tick_size: f32,
    /// Y tick label size in points.
    pub y_tick_size: f32,
    /// Gaps between panels.
    pub spacing: Spacing,
    /// Figure size in inches.
    pub figure_size: FigureSize,
    /// Share the x range across panels.
    pub share_x: bool,
    /// Share the y range across panels.
    pub share_y: bool,
    /// Resolution.
    pub dpi: f32,
}

impl Default for EachOptions {
    fn default() -> Self {
        Self {
            x_tick_interval: 1,
            x_label_size: 12.0,
            y_label_size: 12.0,
            x_tick_size: 10.0,
            y_tick_size: 10.0,
            spacing: Spacing::uniform(0.4),
            figure_size: FigureSize::square(7.0),
            share_x: true,
            share_y: true,
            dpi: DEFAULT_DPI,
        }
    }
}

impl EachOptions {
    /// Label every `interval`-th x value.
    #[must_use]
    pub fn x_tick_interval(mut self, interval: usize) -> Self {
        self.x_tick_interval = interval;
        self
    }

    /// Set axis sharing.
    #[must_use]
    pub fn sharing(mut self, share_x: bool, share_y: bool) -> Self {
        self.share_x = share_x;
        self.share_y = share_y;
        self
    }
}

/// Build a figure with series `i` in panel `i`, row-major.
///
/// Each used panel is titled on its y axis with the series label; `x_label`
/// is centered under the whole figure. Panels past the last series stay
/// empty.
///
/// # Errors
///
/// Returns [`Error::GridExhausted`](crate::Error::GridExhausted) when there
/// are more labels than panels, [`Error::MissingColumn`](crate::Error::MissingColumn)
/// when there are more labels than columns, or a tick/size error.
pub fn compose_each<S: AsRef<str>>(
    data: &SeriesTable,
    grid: PanelGrid,
    x_label: &str,
    labels: &[S],
    options: &EachOptions,
) -> Result<Figure> {
    let x_ticks = every_nth(data.x(), options.x_tick_interval)?;
    let style = PanelStyle {
        x_ticks: &x_ticks,
        x_tick_size: options.x_tick_size,
        y_tick_size: options.y_tick_size,
    };

    let mut fig = Figure::new(grid, options.figure_size, options.dpi)?
        .with_spacing(options.spacing)
        .with_sharing(options.share_x, options.share_y);
    let mut cursor = GridCursor::per_series(grid);

    for (i, label) in labels.iter().enumerate() {
        let ax = next_panel(&mut fig, &mut cursor)?;
        ax.plot(data.x(), data.column(i)?, None)?;
        ax.set_ylabel(label.as_ref(), options.y_label_size);
        style.apply(ax);
    }

    fig.text(FigureText::new(x_label, 0.5, 0.0, options.x_label_size));

    warn_undrawn(data, labels.len());
    Ok(fig)
}

/// Draw each labeled series in its own panel and save it to `out`.
///
/// # Errors
///
/// Returns any error from [`compose_each`], or an I/O or encoding error.
/// Nothing is written when composing fails.
pub fn plot_each<S: AsRef<str>>(
    data: &SeriesTable,
    grid: PanelGrid,
    x_label: &str,
    labels: &[S],
    out: &OutputPath,
    options: &EachOptions,
) -> Result<()> {
    debug!(
        "plot_each: {} series on {}x{} -> {}",
        labels.len(),
        grid.rows(),
        grid.cols(),
        out.resolve().display()
    );
    render_to(out, || compose_each(data, grid, x_label, labels, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::layout::GridPosition;

    fn table(series: usize) -> SeriesTable {
        let x: Vec<f64> = (0..12).map(f64::from).collect();
        let cols = (0..series).map(|s| x.iter().map(|v| v + s as f64).collect()).collect();
        SeriesTable::from_columns(x, cols).unwrap()
    }

    #[test]
    fn test_row_major_placement() {
        let labels = ["A", "B", "C", "D", "E"];
        let grid = PanelGrid::new(2, 3).unwrap();
        let fig = compose_each(&table(5), grid, "x", &labels, &EachOptions::default()).unwrap();

        let expected = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)];
        for (label, (row, col)) in labels.iter().zip(expected) {
            let ax = fig.axes(GridPosition::new(row, col)).unwrap();
            assert_eq!(ax.lines().len(), 1);
            assert_eq!(ax.y_label().unwrap().text, *label);
            assert!(ax.legend_options().is_none());
        }
        assert!(fig.axes(GridPosition::new(1, 2)).unwrap().is_empty());
        assert_eq!(fig.texts().len(), 1);
        assert_eq!(fig.texts()[0].text, "x");
    }

    #[test]
    fn test_single_row_and_column() {
        let labels = ["A", "B", "C"];
        for grid in [PanelGrid::new(1, 3).unwrap(), PanelGrid::new(3, 1).unwrap()] {
            let fig = compose_each(&table(3), grid, "x", &labels, &EachOptions::default()).unwrap();
            assert!(fig.panels().all(|(_, ax)| ax.lines().len() == 1));
        }
    }

    #[test]
    fn test_grid_exhausted() {
        let grid = PanelGrid::new(1, 2).unwrap();
        let result = compose_each(&table(3), grid, "x", &["A", "B", "C"], &EachOptions::default());
        assert!(matches!(
            result,
            Err(Error::GridExhausted { series: 2, rows: 1, cols: 2 })
        ));
    }

    #[test]
    fn test_sharing_flags_reach_figure() {
        let grid = PanelGrid::new(1, 2).unwrap();
        let opts = EachOptions::default().sharing(false, true);
        let fig = compose_each(&table(2), grid, "x", &["A", "B"], &opts).unwrap();
        assert_eq!(fig.sharing(), (false, true));
    }
}
