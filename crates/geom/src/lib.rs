//! Geometry primitives used across bramble.
//!
//! All coordinates are signed pixels. Sizes are signed too, so that content
//! boxes can be computed by plain subtraction; constructors that take sizes
//! never produce negative extents.

#![warn(missing_docs)]

/// Padding and margin edges.
mod edges;
/// Width/height size type.
mod expanse;
/// One-dimensional span operations.
mod linesegment;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use edges::Edges;
pub use expanse::Expanse;
pub use linesegment::LineSegment;
pub use point::Point;
pub use rect::Rect;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// The x axis (widths).
    Horizontal,
    /// The y axis (heights).
    Vertical,
}
