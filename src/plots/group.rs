//! Runs of consecutive series sharing a panel, one legend per panel.

use log::debug;

use crate::data::SeriesTable;
use crate::error::{Error, Result};
use crate::figure::{every_nth, Figure, FigureSize, FigureText, LegendLocation, LegendOptions, DEFAULT_DPI};
use crate::layout::{GridCursor, PanelGrid, Spacing};

use super::{next_panel, render_to, warn_undrawn, AxisLabels, OutputPath, PanelStyle};

/// Figure-fraction position of the shared y title.
const Y_TITLE_X: f32 = 0.07;

/// Options for [`plot_each_group`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GroupOptions {
    /// Label every n-th x value.
    pub x_tick_interval: usize,
    /// Shared x title size in points.
    pub x_label_size: f32,
    /// Shared y title size in points.
    pub y_label_size: f32,
    /// X tick label size in points.
    pub x_tick_size: f32,
    /// Y tick label size in points.
    pub y_tick_size: f32,
    /// Per-panel legend layout.
    pub legend: LegendOptions,
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

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            x_tick_interval: 1,
            x_label_size: 14.0,
            y_label_size: 14.0,
            x_tick_size: 10.0,
            y_tick_size: 10.0,
            legend: LegendOptions {
                columns: 1,
                font_size: 8.0,
                location: LegendLocation::LowerRight,
            },
            spacing: Spacing::uniform(0.4),
            figure_size: FigureSize::square(7.0),
            share_x: true,
            share_y: true,
            dpi: DEFAULT_DPI,
        }
    }
}

impl GroupOptions {
    /// Label every `interval`-th x value.
    #[must_use]
    pub fn x_tick_interval(mut self, interval: usize) -> Self {
        self.x_tick_interval = interval;
        self
    }

    /// Set the legend location.
    #[must_use]
    pub fn legend_location(mut self, location: LegendLocation) -> Self {
        self.legend.location = location;
        self
    }
}

/// Build a figure with `group_size` consecutive series per panel.
///
/// Every used panel gets its own legend. The axis titles are placed once
/// for the whole figure: x centered under it, y rotated along its left edge.
///
/// # Errors
///
/// Returns [`Error::InvalidGroupSize`] for a group size of zero,
/// [`Error::IncompleteGroup`] if the label count is not a multiple of the
/// group size, [`Error::GridExhausted`] when the groups outnumber the
/// panels, or [`Error::MissingColumn`] for labels without a column.
pub fn compose_each_group<S: AsRef<str>>(
    data: &SeriesTable,
    grid: PanelGrid,
    group_size: usize,
    axis: &AxisLabels,
    labels: &[S],
    options: &GroupOptions,
) -> Result<Figure> {
    let mut cursor = GridCursor::grouped(grid, group_size)?;
    if labels.len() % group_size != 0 {
        return Err(Error::IncompleteGroup {
            series: labels.len(),
            group_size,
        });
    }

    let x_ticks = every_nth(data.x(), options.x_tick_interval)?;
    let style = PanelStyle {
        x_ticks: &x_ticks,
        x_tick_size: options.x_tick_size,
        y_tick_size: options.y_tick_size,
    };

    let mut fig = Figure::new(grid, options.figure_size, options.dpi)?
        .with_spacing(options.spacing)
        .with_sharing(options.share_x, options.share_y);

    for (i, label) in labels.iter().enumerate() {
        let ax = next_panel(&mut fig, &mut cursor)?;
        ax.plot(data.x(), data.column(i)?, Some(label.as_ref()))?;
        style.apply(ax);
        ax.legend(options.legend);
    }

    fig.text(FigureText::new(axis.x.as_str(), 0.5, 0.0, options.x_label_size));
    fig.text(FigureText::new(axis.y.as_str(), Y_TITLE_X, 0.5, options.y_label_size).vertical());

    warn_undrawn(data, labels.len());
    Ok(fig)
}

/// Draw labeled series in groups of `group_size` per panel and save to `out`.
///
/// # Errors
///
/// Returns any error from [`compose_each_group`], or an I/O or encoding
/// error. Nothing is written when composing fails.
pub fn plot_each_group<S: AsRef<str>>(
    data: &SeriesTable,
    grid: PanelGrid,
    group_size: usize,
    axis: &AxisLabels,
    labels: &[S],
    out: &OutputPath,
    options: &GroupOptions,
) -> Result<()> {
    debug!(
        "plot_each_group: {} series in groups of {group_size} on {}x{} -> {}",
        labels.len(),
        grid.rows(),
        grid.cols(),
        out.resolve().display()
    );
    render_to(out, || compose_each_group(data, grid, group_size, axis, labels, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridPosition;

    fn table(series: usize) -> SeriesTable {
        let x: Vec<f64> = (0..16).map(f64::from).collect();
        let cols = (0..series).map(|s| x.iter().map(|v| v * s as f64).collect()).collect();
        SeriesTable::from_columns(x, cols).unwrap()
    }

    #[test]
    fn test_pairs_share_panels() {
        let grid = PanelGrid::new(1, 2).unwrap();
        let fig = compose_each_group(
            &table(4),
            grid,
            2,
            &AxisLabels::new("x", "y"),
            &["A", "B", "C", "D"],
            &GroupOptions::default(),
        )
        .unwrap();

        let left = fig.axes(GridPosition::new(0, 0)).unwrap();
        let right = fig.axes(GridPosition::new(0, 1)).unwrap();
        let names = |ax: &crate::figure::Axes| ax.legend_entries().into_iter().map(|e| e.label).collect::<Vec<_>>();
        assert_eq!(names(left), vec!["A", "B"]);
        assert_eq!(names(right), vec!["C", "D"]);
        assert_eq!(left.legend_options().unwrap().location, LegendLocation::LowerRight);

        let texts = fig.texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[1].text, "y");
        assert_eq!(texts[1].orientation, crate::render::Orientation::Vertical);
    }

    #[test]
    fn test_group_of_one_matches_per_series() {
        let grid = PanelGrid::new(2, 2).unwrap();
        let fig = compose_each_group(&table(3), grid, 1, &AxisLabels::default(), &["A", "B", "C"], &GroupOptions::default())
            .unwrap();
        assert_eq!(fig.axes(GridPosition::new(1, 0)).unwrap().lines().len(), 1);
        assert!(fig.axes(GridPosition::new(1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_group_errors() {
        let grid = PanelGrid::new(1, 2).unwrap();
        let axis = AxisLabels::default();
        let opts = GroupOptions::default();

        assert!(matches!(
            compose_each_group(&table(3), grid, 0, &axis, &["A"], &opts),
            Err(Error::InvalidGroupSize)
        ));
        assert!(matches!(
            compose_each_group(&table(3), grid, 2, &axis, &["A", "B", "C"], &opts),
            Err(Error::IncompleteGroup { series: 3, group_size: 2 })
        ));
        assert!(matches!(
            compose_each_group(&table(6), grid, 2, &axis, &["A", "B", "C", "D", "E", "F"], &opts),
            Err(Error::GridExhausted { series: 4, .. })
        ));
    }
}
