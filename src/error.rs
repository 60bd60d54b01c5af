//! Error types for trueno-panels operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while composing, rendering or saving a figure.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (directory creation, file writes).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// JPEG (or other `image` crate) encoding error.
    #[error("Image encoding error: {0}")]
    ImageEncoding(#[from] image::ImageError),

    /// Invalid dimensions for framebuffer or figure.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A y column does not have the same length as the x column.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// A series label refers to a column the table does not have.
    #[error("Series {index} has no data column (table has {available} columns)")]
    MissingColumn {
        /// Index of the requested column.
        index: usize,
        /// Number of columns in the table.
        available: usize,
    },

    /// A panel grid with zero rows or columns.
    #[error("Invalid panel grid: {rows}x{cols}")]
    InvalidGrid {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },

    /// Every panel of the grid is already used.
    #[error("Series {series} does not fit in a {rows}x{cols} panel grid")]
    GridExhausted {
        /// Index of the series that could not be placed.
        series: usize,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },

    /// Group size of zero.
    #[error("Group size must be at least 1")]
    InvalidGroupSize,

    /// Series count is not a multiple of the group size.
    #[error("{series} series cannot be split into groups of {group_size}")]
    IncompleteGroup {
        /// Number of declared series.
        series: usize,
        /// Requested group size.
        group_size: usize,
    },

    /// Tick interval of zero.
    #[error("X tick interval must be at least 1")]
    InvalidTickInterval,

    /// Unknown legend location keyword.
    #[error("Invalid legend location: {0:?}")]
    InvalidLegendLocation(String),

    /// Output file extension with no encoder.
    #[error("Unsupported image format: {0:?}")]
    UnsupportedFormat(String),

    /// Scale domain error (e.g., zero-width domain).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Configuration file could not be parsed.
    #[cfg(feature = "config")]
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line of the first error (0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_grid_exhausted_names_the_series() {
        let err = Error::GridExhausted {
            series: 2,
            rows: 1,
            cols: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("Series 2"));
        assert!(msg.contains("1x2"));
    }

    #[test]
    fn test_io_error_converts() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
