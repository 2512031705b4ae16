//! Conversion of declarative lengths into pixels.
//!
//! Percentages resolve against the container's content extent, which is
//! itself computed from the container's declarative width or height, so
//! chains of percentage-sized ancestors resolve recursively up to the
//! screen. Nothing here mutates the tree.

use geom::{Axis, Expanse, Point};

use crate::{
    Core,
    id::NodeId,
    length::Length,
    node::{Limits, Node},
};

/// Pick one component of an extent.
fn along(e: Expanse, axis: Axis) -> i32 {
    match axis {
        Axis::Horizontal => e.w,
        Axis::Vertical => e.h,
    }
}

/// Content extent of the container holding `id`, along `axis`.
pub(crate) fn container_extent(core: &Core, id: NodeId, axis: Axis) -> i32 {
    let screen = along(core.config.screen(), axis);
    let Some(parent) = core.nodes.get(id).and_then(|n| n.parent) else {
        return screen;
    };
    if parent == core.root {
        return screen;
    }
    let Some(p) = core.nodes.get(parent) else {
        return screen;
    };
    let (len, pad) = match axis {
        Axis::Horizontal => (p.spec.w, p.padding.horizontal()),
        Axis::Vertical => (p.spec.h, p.padding.vertical()),
    };
    let outer = match len {
        Length::Px(v) => v,
        Length::Scale(_) => len.resolve(container_extent(core, parent, axis)),
    };
    outer - pad
}

/// Resolve a length for `id` along `axis`.
pub(crate) fn length(core: &Core, id: NodeId, len: Length, axis: Axis) -> i32 {
    match len {
        Length::Px(v) => v,
        Length::Scale(_) => len.resolve(container_extent(core, id, axis)),
    }
}

/// Resolved content size of the container holding `id`. Unlike
/// [`container_extent`] this uses the container's current pixel size.
pub(crate) fn container_size(core: &Core, id: NodeId) -> Expanse {
    match core.nodes.get(id).and_then(|n| n.parent) {
        Some(parent) if parent != core.root => core
            .nodes
            .get(parent)
            .map(Node::content_size)
            .unwrap_or_else(|| core.config.screen()),
        _ => core.config.screen(),
    }
}

/// Resolve position and size bounds. The maximum is raised to the minimum
/// where they cross, and minimum sizes are never negative.
pub(crate) fn limits(core: &Core, id: NodeId) -> Limits {
    let Some(node) = core.nodes.get(id) else {
        return Limits::default();
    };
    let spec = node.spec;
    let cw = container_extent(core, id, Axis::Horizontal);
    let ch = container_extent(core, id, Axis::Vertical);
    let r = |l: Option<Length>, extent: i32, default: i32| l.map_or(default, |l| l.resolve(extent));

    let min_size = Expanse::new(r(spec.min_w, cw, 0).max(0), r(spec.min_h, ch, 0).max(0));
    let max_size = Expanse::new(r(spec.max_w, cw, i32::MAX), r(spec.max_h, ch, i32::MAX))
        .max(min_size);
    let min_pos = Point::new(r(spec.min_x, cw, i32::MIN), r(spec.min_y, ch, i32::MIN));
    let max_pos = Point::new(
        r(spec.max_x, cw, i32::MAX).max(min_pos.x),
        r(spec.max_y, ch, i32::MAX).max(min_pos.y),
    );
    Limits {
        min_pos,
        max_pos,
        min_size,
        max_size,
    }
}

/// Resolve the declarative size, clamped to the resolved size bounds.
pub(crate) fn size(core: &Core, id: NodeId) -> Expanse {
    let Some(node) = core.nodes.get(id) else {
        return Expanse::default();
    };
    let limits = limits(core, id);
    Expanse::new(
        length(core, id, node.spec.w, Axis::Horizontal),
        length(core, id, node.spec.h, Axis::Vertical),
    )
    .clamp_between(limits.min_size, limits.max_size)
}

/// Resolve the position. Aligned widgets are placed within the container's
/// current content box and shifted by their offset; flow widgets resolve
/// their declarative coordinates, which flow layout later overrides.
pub(crate) fn position(core: &Core, id: NodeId) -> Point {
    let Some(node) = core.nodes.get(id) else {
        return Point::zero();
    };
    let explicit = || {
        Point::new(
            length(core, id, node.spec.x, Axis::Horizontal),
            length(core, id, node.spec.y, Axis::Vertical),
        )
    };
    if node.position.is_flow() {
        return explicit();
    }
    match node.align.position(container_size(core, id), node.size) {
        Some(p) => p + node.offset,
        None => explicit(),
    }
}
