//! The three figure renderers.
//!
//! Each renderer comes in two halves: `compose_*` builds the [`Figure`]
//! without touching the filesystem, `plot_*` creates the output directory,
//! composes and saves. The figure is dropped when the call returns, on
//! success and on error alike.

mod all;
mod each;
mod group;

pub use all::{compose_all, plot_all, AllOptions};
pub use each::{compose_each, plot_each, EachOptions};
pub use group::{compose_each_group, plot_each_group, GroupOptions};

use std::fs;
use std::path::{Path, PathBuf};

use log::{trace, warn};

use crate::data::SeriesTable;
use crate::error::{Error, Result};
use crate::figure::{Axes, Figure};
use crate::layout::GridCursor;

// ============================================================================
// Output Path
// ============================================================================

/// Output directory plus file name.
///
/// The name is joined onto the directory after stripping leading path
/// separators, so `"/chart.png"` lands inside `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    name: String,
}

impl OutputPath {
    /// Create an output path.
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the image file.
    #[must_use]
    pub fn resolve(&self) -> PathBuf {
        self.dir.join(self.name.trim_start_matches(['/', '\\']))
    }

    /// Create the directory (and parents) and return the file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory cannot be created.
    pub fn prepare(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        Ok(self.resolve())
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// X and y axis titles.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxisLabels {
    /// X axis title.
    pub x: String,
    /// Y axis title.
    pub y: String,
}

impl AxisLabels {
    /// Create axis labels.
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into() }
    }
}

/// Tick thinning and tick label sizes applied to every drawn panel.
#[derive(Debug, Clone, Copy)]
struct PanelStyle<'a> {
    x_ticks: &'a [f64],
    x_tick_size: f32,
    y_tick_size: f32,
}

impl PanelStyle<'_> {
    fn apply(&self, ax: &mut Axes) {
        ax.set_xticks(self.x_ticks.to_vec());
        ax.set_tick_sizes(self.x_tick_size, self.y_tick_size);
        ax.set_grid(true);
    }
}

/// Panel the cursor assigns to the next series.
fn next_panel<'f>(fig: &'f mut Figure, cursor: &mut GridCursor) -> Result<&'f mut Axes> {
    let series = cursor.placed();
    let pos = cursor.advance()?;
    trace!("series {series} -> panel ({}, {})", pos.row, pos.col);
    let grid = cursor.grid();
    fig.axes_mut(pos).ok_or(Error::GridExhausted {
        series,
        rows: grid.rows(),
        cols: grid.cols(),
    })
}

fn warn_undrawn(data: &SeriesTable, labels: usize) {
    if data.column_count() > labels {
        warn!(
            "{} of {} columns have no label and are not drawn",
            data.column_count() - labels,
            data.column_count()
        );
    }
}

/// Compose, then save to `out`, creating its directory first.
fn render_to(out: &OutputPath, compose: impl FnOnce() -> Result<Figure>) -> Result<()> {
    let path = out.prepare()?;
    let fig = compose()?;
    fig.save(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_leading_separator() {
        let out = OutputPath::new("/tmp/figs", "/testAll.png");
        assert_eq!(out.resolve(), PathBuf::from("/tmp/figs/testAll.png"));

        let out = OutputPath::new("figs", "plain.jpg");
        assert_eq!(out.resolve(), PathBuf::from("figs/plain.jpg"));
    }

    #[test]
    fn test_prepare_creates_nested_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let out = OutputPath::new(tmp.path().join("a/b/c"), "x.png");
        let path = out.prepare().unwrap();
        assert!(tmp.path().join("a/b/c").is_dir());
        assert_eq!(path, tmp.path().join("a/b/c/x.png"));
        // Existing directory is fine.
        out.prepare().unwrap();
    }
}
