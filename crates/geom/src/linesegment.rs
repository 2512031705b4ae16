/// A directionless one-dimensional span: the projection of a rectangle onto
/// one axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct LineSegment {
    /// The offset of this segment.
    pub off: i32,
    /// The length of this segment.
    pub len: i32,
}

impl LineSegment {
    /// Construct a segment.
    pub fn new(off: i32, len: i32) -> Self {
        Self { off, len }
    }

    /// The far limit of the segment (exclusive).
    pub fn far(&self) -> i32 {
        self.off.saturating_add(self.len)
    }

    /// True if the segment has no length.
    pub fn is_empty(&self) -> bool {
        self.len <= 0
    }

    /// Return a line segment that encloses this line segment and another. If
    /// the lines overlap or abut, this is equivalent to joining the segments.
    pub fn enclose(&self, other: &Self) -> Self {
        let off = self.off.min(other.off);
        Self {
            off,
            len: self.far().max(other.far()) - off,
        }
    }

    /// Do the two segments share at least one unit? Abutting segments and
    /// empty segments never overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.off < other.far() && other.off < self.far()
    }

    /// Does the segment contain the offset? The far limit is exclusive.
    pub fn contains(&self, v: i32) -> bool {
        v >= self.off && v < self.far()
    }
}
