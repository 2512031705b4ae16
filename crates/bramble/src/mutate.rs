//! Rules applied by the mutation API before work is enqueued: dock-aware
//! size setting, bound correction, stacking clamps and state filtering.

use geom::{Expanse, Point};

use crate::{
    align::Align,
    config::Config,
    length::Length,
    node::Node,
    state::{Dock, WidgetState},
};

/// Store declarative sizes, skipping any axis the dock mode controls.
/// `None` leaves an axis unchanged.
pub(crate) fn apply_size_spec(node: &mut Node, w: Option<Length>, h: Option<Length>) {
    if let Some(w) = w
        && !node.dock.stretches_width()
    {
        node.spec.w = w;
    }
    if let Some(h) = h
        && !node.dock.stretches_height()
    {
        node.spec.h = h;
    }
}

/// Apply a dock mode: the matching alignment with a zero offset, and a full
/// container extent on each stretched axis.
pub(crate) fn apply_dock(node: &mut Node, dock: Dock) {
    node.align = match dock {
        Dock::None => Align::None,
        Dock::Top => Align::TopCenter,
        Dock::Bottom => Align::BottomCenter,
        Dock::Left => Align::MiddleLeft,
        Dock::Right => Align::MiddleRight,
        Dock::Fill => Align::MiddleCenter,
    };
    node.offset = Point::zero();
    if dock.stretches_width() {
        node.spec.w = Length::percent(100.0);
    }
    if dock.stretches_height() {
        node.spec.h = Length::percent(100.0);
    }
    node.dock = dock;
}

/// Correct a pixel size range: negative values become zero and the maximum
/// is raised to the minimum.
pub(crate) fn correct_size_range(min: Expanse, max: Expanse) -> (Expanse, Expanse) {
    let min = Expanse::new(min.w.max(0), min.h.max(0));
    let max = Expanse::new(max.w.max(0), max.h.max(0)).max(min);
    (min, max)
}

/// Correct a position range: negative values become zero and the maximum is
/// raised to the minimum.
pub(crate) fn correct_pos_range(min: Point, max: Point) -> (Point, Point) {
    let min = Point::new(min.x.max(0), min.y.max(0));
    let max = Point::new(max.x.max(min.x), max.y.max(min.y));
    (min, max)
}

/// Clamp a stacking index into the band for modal or non-modal widgets.
pub(crate) fn clamp_z(config: &Config, modal: bool, z: i32) -> i32 {
    if modal {
        z.max(config.modal_z_floor)
    } else {
        z.min(config.max_z_index)
    }
}

/// The state a request should actually apply, or `None` if the widget does
/// not respond to the requested state. Disabled widgets always end up in
/// [`WidgetState::DISABLE`].
pub(crate) fn effective_state(node: &Node, requested: WidgetState) -> Option<WidgetState> {
    if !node.valid_states.contains(requested) {
        return None;
    }
    if node.enabled {
        Some(requested)
    } else {
        Some(WidgetState::DISABLE)
    }
}

/// True if a requested pixel size can be applied.
pub(crate) fn valid_size(size: Expanse) -> bool {
    size.w > 0 && size.h > 0
}
