//! Every series on one panel with a legend.

use log::debug;

use crate::data::SeriesTable;
use crate::error::{Error, Result};
use crate::figure::{every_nth, Figure, FigureSize, LegendLocation, LegendOptions, DEFAULT_DPI};
use crate::layout::{GridPosition, PanelGrid};

use super::{render_to, warn_undrawn, AxisLabels, OutputPath, PanelStyle};

/// Options for [`plot_all`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct AllOptions {
    /// Label every n-th x value.
    pub x_tick_interval: usize,
    /// X axis title size in points.
    pub x_label_size: f32,
    /// Y axis title size in points.
    pub y_label_size: f32,
    /// X tick label size in points.
    pub x_tick_size: f32,
    /// Y tick label size in points.
    pub y_tick_size: f32,
    /// Legend layout.
    pub legend: LegendOptions,
    /// Figure size in inches.
    pub figure_size: FigureSize,
    /// Resolution.
    pub dpi: f32,
}

impl Default for AllOptions {
    fn default() -> Self {
        Self {
            x_tick_interval: 1,
            x_label_size: 14.0,
            y_label_size: 14.0,
            x_tick_size: 12.0,
            y_tick_size: 12.0,
            legend: LegendOptions {
                columns: 1,
                font_size: 10.0,
                location: LegendLocation::Best,
            },
            figure_size: FigureSize::square(5.0),
            dpi: DEFAULT_DPI,
        }
    }
}

impl AllOptions {
    /// Label every `interval`-th x value.
    #[must_use]
    pub fn x_tick_interval(mut self, interval: usize) -> Self {
        self.x_tick_interval = interval;
        self
    }

    /// Set the number of legend columns.
    #[must_use]
    pub fn legend_columns(mut self, columns: usize) -> Self {
        self.legend.columns = columns;
        self
    }

    /// Set the legend location.
    #[must_use]
    pub fn legend_location(mut self, location: LegendLocation) -> Self {
        self.legend.location = location;
        self
    }
}

/// Build a single-panel figure holding one line per label.
///
/// Label `i` names column `i` of `data`; columns past the last label are
/// not drawn.
///
/// # Errors
///
/// Returns [`Error::MissingColumn`] if there are more labels than columns,
/// [`Error::InvalidTickInterval`] for an interval of zero, or
/// [`Error::InvalidDimensions`] for a degenerate figure size.
pub fn compose_all<S: AsRef<str>>(
    data: &SeriesTable,
    axis: &AxisLabels,
    labels: &[S],
    options: &AllOptions,
) -> Result<Figure> {
    let x_ticks = every_nth(data.x(), options.x_tick_interval)?;
    let mut fig = Figure::new(PanelGrid::single(), options.figure_size, options.dpi)?;
    let ax = fig.axes_mut(GridPosition::new(0, 0)).ok_or(Error::GridExhausted {
        series: 0,
        rows: 1,
        cols: 1,
    })?;

    for (i, label) in labels.iter().enumerate() {
        ax.plot(data.x(), data.column(i)?, Some(label.as_ref()))?;
    }

    ax.set_xlabel(axis.x.as_str(), options.x_label_size);
    ax.set_ylabel(axis.y.as_str(), options.y_label_size);
    PanelStyle {
        x_ticks: &x_ticks,
        x_tick_size: options.x_tick_size,
        y_tick_size: options.y_tick_size,
    }
    .apply(ax);
    ax.legend(options.legend);

    warn_undrawn(data, labels.len());
    Ok(fig)
}

/// Draw every labeled series on one panel and save it to `out`.
///
/// The output directory is created if needed and an existing file is
/// overwritten.
///
/// # Errors
///
/// Returns any error from [`compose_all`], or an I/O or encoding error.
pub fn plot_all<S: AsRef<str>>(
    data: &SeriesTable,
    axis: &AxisLabels,
    labels: &[S],
    out: &OutputPath,
    options: &AllOptions,
) -> Result<()> {
    debug!("plot_all: {} series -> {}", labels.len(), out.resolve().display());
    render_to(out, || compose_all(data, axis, labels, options))
}
