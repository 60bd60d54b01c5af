//! A single panel: its lines, labels, ticks and legend.

use crate::color::{cycle_color, Rgba};
use crate::error::{Error, Result};
use crate::scale::extent;

use super::legend::{LegendEntry, LegendOptions};

/// A polyline drawn in a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Line2D {
    /// Legend label.
    pub label: Option<String>,
    /// X values.
    pub x: Vec<f64>,
    /// Y values.
    pub y: Vec<f64>,
    /// Stroke color.
    pub color: Rgba,
}

/// Text with a font size in points.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedText {
    /// Content.
    pub text: String,
    /// Size in points.
    pub size: f32,
}

impl SizedText {
    /// Create sized text.
    #[must_use]
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }
}

/// One panel of a figure.
///
/// Lines take colors from the default cycle in the order they are added;
/// the cycle restarts in every panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    lines: Vec<Line2D>,
    x_label: Option<SizedText>,
    y_label: Option<SizedText>,
    x_ticks: Option<Vec<f64>>,
    x_tick_size: f32,
    y_tick_size: f32,
    legend: Option<LegendOptions>,
    grid: bool,
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes {
    /// An empty panel with 10 pt tick labels and no grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            x_label: None,
            y_label: None,
            x_ticks: None,
            x_tick_size: 10.0,
            y_tick_size: 10.0,
            legend: None,
            grid: false,
        }
    }

    /// Add a line with the next cycle color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if `x` and `y` differ in length.
    pub fn plot(&mut self, x: &[f64], y: &[f64], label: Option<&str>) -> Result<&Line2D> {
        if x.len() != y.len() {
            return Err(Error::DataLengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        let color = cycle_color(self.lines.len());
        self.lines.push(Line2D {
            label: label.map(str::to_string),
            x: x.to_vec(),
            y: y.to_vec(),
            color,
        });
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Set the x axis label.
    pub fn set_xlabel(&mut self, text: impl Into<String>, size: f32) {
        self.x_label = Some(SizedText::new(text, size));
    }

    /// Set the y axis label.
    pub fn set_ylabel(&mut self, text: impl Into<String>, size: f32) {
        self.y_label = Some(SizedText::new(text, size));
    }

    /// Place x ticks at exactly these values.
    pub fn set_xticks(&mut self, ticks: Vec<f64>) {
        self.x_ticks = Some(ticks);
    }

    /// Set tick label sizes in points.
    pub fn set_tick_sizes(&mut self, x: f32, y: f32) {
        self.x_tick_size = x;
        self.y_tick_size = y;
    }

    /// Show a legend with these options.
    pub fn legend(&mut self, options: LegendOptions) {
        self.legend = Some(options);
    }

    /// Toggle the dashed background grid.
    pub fn set_grid(&mut self, on: bool) {
        self.grid = on;
    }

    /// Lines in drawing order.
    #[must_use]
    pub fn lines(&self) -> &[Line2D] {
        &self.lines
    }

    /// Whether the panel has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// X axis label.
    #[must_use]
    pub fn x_label(&self) -> Option<&SizedText> {
        self.x_label.as_ref()
    }

    /// Y axis label.
    #[must_use]
    pub fn y_label(&self) -> Option<&SizedText> {
        self.y_label.as_ref()
    }

    /// Explicit x tick positions, if set.
    #[must_use]
    pub fn x_ticks(&self) -> Option<&[f64]> {
        self.x_ticks.as_deref()
    }

    /// Tick label sizes `(x, y)` in points.
    #[must_use]
    pub const fn tick_sizes(&self) -> (f32, f32) {
        (self.x_tick_size, self.y_tick_size)
    }

    /// Legend options, if a legend was requested.
    #[must_use]
    pub fn legend_options(&self) -> Option<&LegendOptions> {
        self.legend.as_ref()
    }

    /// Whether the grid is on.
    #[must_use]
    pub const fn grid(&self) -> bool {
        self.grid
    }

    /// Legend rows for every labeled line, in drawing order.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.lines
            .iter()
            .filter_map(|line| {
                line.label.as_ref().map(|label| LegendEntry {
                    label: label.clone(),
                    color: line.color,
                })
            })
            .collect()
    }

    /// Finite x extent over all lines.
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        extent(self.lines.iter().flat_map(|l| l.x.iter()))
    }

    /// Finite y extent over all lines.
    #[must_use]
    pub fn y_extent(&self) -> Option<(f64, f64)> {
        extent(self.lines.iter().flat_map(|l| l.y.iter()))
    }
}

/// Every `interval`-th value starting with the first.
///
/// # Errors
///
/// Returns [`Error::InvalidTickInterval`] if `interval` is zero.
pub fn every_nth(values: &[f64], interval: usize) -> Result<Vec<f64>> {
    if interval == 0 {
        return Err(Error::InvalidTickInterval);
    }
    Ok(values.iter().copied().step_by(interval).collect())
}
