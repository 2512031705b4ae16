//! Nine-way alignment of a widget within its container.

use geom::{Expanse, Point};

/// Placement of an absolutely positioned widget within its container's
/// content box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    /// Use the explicit coordinates.
    #[default]
    None,
    /// Top left corner.
    TopLeft,
    /// Top edge, centered horizontally.
    TopCenter,
    /// Top right corner.
    TopRight,
    /// Left edge, centered vertically.
    MiddleLeft,
    /// Centered on both axes.
    MiddleCenter,
    /// Right edge, centered vertically.
    MiddleRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom edge, centered horizontally.
    BottomCenter,
    /// Bottom right corner.
    BottomRight,
}

/// Where an axis places an item along a span.
#[derive(Clone, Copy)]
enum Anchor {
    /// Leading edge.
    Start,
    /// Center.
    Center,
    /// Trailing edge.
    End,
}

impl Anchor {
    /// Offset of an item of length `len` within a span of length `span`.
    fn offset(self, span: i32, len: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (span - len) / 2,
            Self::End => span - len,
        }
    }
}

impl Align {
    /// Horizontal and vertical anchors, or `None` for [`Align::None`].
    fn anchors(self) -> Option<(Anchor, Anchor)> {
        use Anchor::*;
        Some(match self {
            Self::None => return None,
            Self::TopLeft => (Start, Start),
            Self::TopCenter => (Center, Start),
            Self::TopRight => (End, Start),
            Self::MiddleLeft => (Start, Center),
            Self::MiddleCenter => (Center, Center),
            Self::MiddleRight => (End, Center),
            Self::BottomLeft => (Start, End),
            Self::BottomCenter => (Center, End),
            Self::BottomRight => (End, End),
        })
    }

    /// Position of a widget of `size` aligned inside `container`, before any
    /// offset. Returns `None` for [`Align::None`]. Oversized widgets get
    /// negative coordinates.
    pub fn position(self, container: Expanse, size: Expanse) -> Option<Point> {
        let (h, v) = self.anchors()?;
        Some(Point::new(
            h.offset(container.w, size.w),
            v.offset(container.h, size.h),
        ))
    }
}
