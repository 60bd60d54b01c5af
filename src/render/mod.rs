//! Rasterization of figure elements into a [`Framebuffer`](crate::framebuffer::Framebuffer).
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: data lines and wide strokes
//! - **Bresenham's Line**: tick marks and axis spines
//! - **5x7 bitmap font**: labels, tick labels and legend text
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;
mod text;

pub use primitives::{
    blend_rect, draw_dashed_hline, draw_dashed_vline, draw_line, draw_line_aa, draw_polyline,
    draw_rect, draw_rect_outline, draw_stroke, Dash,
};
pub use text::{draw_text, draw_text_aligned, HAlign, Orientation, TextStyle, VAlign};
