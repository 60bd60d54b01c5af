//! # Trueno-Panels
//!
//! Quick-look line charts for tabular numeric data: one shared x column and
//! several y columns, laid out on one panel, one panel per series, or in
//! groups of series per panel, and saved as PNG or JPEG images.
//!
//! Built on the [trueno](https://crates.io/crates/trueno) core library for
//! SIMD alpha compositing of output rows, with a pure Rust rasterizer and no system
//! graphics dependencies.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trueno_panels::prelude::*;
//!
//! # fn main() -> trueno_panels::Result<()> {
//! let x: Vec<f64> = (0..32).map(f64::from).collect();
//! let data = SeriesTable::new(x.clone())?
//!     .with_column("A", x.iter().map(|v| v.sin()).collect::<Vec<_>>())?
//!     .with_column("B", x.iter().map(|v| v.cos()).collect::<Vec<_>>())?;
//!
//! let labels = data.labels();
//! plot_all(
//!     &data,
//!     &AxisLabels::new("Val1", "Val2"),
//!     &labels,
//!     &OutputPath::new("figures", "all.png"),
//!     &AllOptions::default().x_tick_interval(10),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `config`: YAML option files ([`config::PlotConfig`])
//! - `cli`: the `trueno-panels` demo binary
//! - `full`: All features enabled

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the line color cycle.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Scale functions for data-to-pixel mappings and tick generation.
pub mod scale;

/// Tabular input data.
pub mod data;

/// Panel grids and series placement.
pub mod layout;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Figures, panels and legends.
pub mod figure;

/// The single, per-series and grouped renderers.
pub mod plots;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization primitives and bitmap text.
pub mod render;

/// Output encoders (PNG, JPEG).
pub mod output;

// ============================================================================
// Optional Modules
// ============================================================================

/// YAML configuration files.
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-panels operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_panels::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::color::Rgba;
    pub use crate::data::SeriesTable;
    pub use crate::error::{Error, Result};
    pub use crate::figure::{Axes, Figure, FigureSize, FigureText, LegendLocation, LegendOptions};
    pub use crate::layout::{GridPosition, PanelGrid, Spacing};
    pub use crate::plots::{
        compose_all, compose_each, compose_each_group, plot_all, plot_each, plot_each_group, AllOptions,
        AxisLabels, EachOptions, GroupOptions, OutputPath,
    };
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
