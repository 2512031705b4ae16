use super::{Expanse, Point};

/// Per-edge insets, used for both padding and margins.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Edges {
    /// Top inset.
    pub top: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
    /// Left inset.
    pub left: i32,
}

impl Edges {
    /// Construct edges in CSS order: top, right, bottom, left.
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same inset on every edge.
    pub fn all(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Sum of the left and right insets.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of the top and bottom insets.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Offset from an outer origin to the inner origin.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Shrink an outer size by these insets, never going below zero.
    pub fn shrink(&self, outer: Expanse) -> Expanse {
        Expanse::new(
            (outer.w - self.horizontal()).max(0),
            (outer.h - self.vertical()).max(0),
        )
    }
}
