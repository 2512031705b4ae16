use super::{Expanse, LineSegment, Point};

/// A rectangle with a signed origin.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Construct a rectangle from a position and a size.
    pub fn from_parts(tl: Point, size: Expanse) -> Self {
        Self {
            tl,
            w: size.w,
            h: size.h,
        }
    }

    /// Does this rect have a zero (or negative) size?
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// X coordinate one past the right edge.
    pub fn right(&self) -> i32 {
        self.tl.x.saturating_add(self.w)
    }

    /// Y coordinate one past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.tl.y.saturating_add(self.h)
    }

    /// The size of this rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// The horizontal extent of this rectangle.
    pub fn hextent(&self) -> LineSegment {
        LineSegment::new(self.tl.x, self.w)
    }

    /// The vertical extent of this rectangle.
    pub fn vextent(&self) -> LineSegment {
        LineSegment::new(self.tl.y, self.h)
    }

    /// Does this rectangle contain the point? The right and bottom edges are
    /// exclusive.
    pub fn contains_point(&self, p: impl Into<Point>) -> bool {
        let p = p.into();
        p.x >= self.tl.x && p.x < self.right() && p.y >= self.tl.y && p.y < self.bottom()
    }

    /// Does this rectangle completely enclose `other`?
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.tl.x >= self.tl.x
            && other.tl.y >= self.tl.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Intersect with another rectangle. Returns `None` if the rectangles do
    /// not overlap or if either is empty.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let left = self.tl.x.max(other.tl.x);
        let top = self.tl.y.max(other.tl.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }

    /// Shift the rectangle by an offset.
    pub fn shift(&self, by: Point) -> Self {
        Self {
            tl: self.tl + by,
            w: self.w,
            h: self.h,
        }
    }

    /// Return the same size at a new position.
    pub fn at(&self, tl: Point) -> Self {
        Self {
            tl,
            w: self.w,
            h: self.h,
        }
    }

    /// Smallest rectangle enclosing both rectangles. Empty rectangles are
    /// ignored.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let h = self.hextent().enclose(&other.hextent());
        let v = self.vextent().enclose(&other.vextent());
        Self::new(h.off, v.off, h.len, v.len)
    }
}
