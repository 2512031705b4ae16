//! Queue draining. Each container's queue is applied in FIFO order, flow
//! layout runs if anything asked for it, and then each child is drained
//! back-to-front.

use std::{cmp::Reverse, mem, sync::Arc};

use geom::{Expanse, Point};
use tracing::{debug, trace};

use crate::{
    Core,
    align::Align,
    dirty, flow,
    id::NodeId,
    length::Length,
    mutate, resolve,
    state::{AutoSizeMode, WidgetState},
    update::{Payload, PendingUpdate, UpdateKind},
};

/// Drain the queue of `container`, then recurse into its children.
///
/// Only the entries present when the drain starts are applied. Anything
/// enqueued while draining, for this container or by a hook, waits for the
/// next tick.
pub(crate) fn process(core: &mut Core, container: NodeId) {
    let Some(queue) = core.nodes.get(container).map(|n| Arc::clone(&n.updates)) else {
        return;
    };
    let mut reflow = false;
    for _ in 0..queue.len() {
        let Some(update) = queue.pop_front() else {
            break;
        };
        if !core.nodes.contains_key(update.target) {
            trace!(widget = ?update.target, kind = ?update.kind, "skipping update for destroyed widget");
            continue;
        }
        trace!(widget = ?update.target, kind = ?update.kind, "apply update");
        // Entries recorded through a stale handle may outlive a re-parent.
        let owner = core.parent(update.target).unwrap_or(container);
        let needs_flow = apply(core, owner, update);
        if owner == container {
            reflow |= needs_flow;
        } else if needs_flow && let Some(node) = core.nodes.get_mut(owner) {
            node.needs_reflow = true;
        }
    }

    let flagged = core
        .nodes
        .get_mut(container)
        .is_some_and(|n| mem::take(&mut n.needs_reflow));
    if reflow || flagged {
        flow::layout(core, container);
    }

    let children = core
        .nodes
        .get(container)
        .map(|n| n.children.clone())
        .unwrap_or_default();
    for child in children.into_iter().rev() {
        process(core, child);
    }
}

/// Apply a single update to a child of `parent`. Returns true if `parent`
/// needs flow layout.
fn apply(core: &mut Core, parent: NodeId, update: PendingUpdate) -> bool {
    let id = update.target;
    match update.kind {
        UpdateKind::Resize => {
            match update.payload {
                Some(Payload::Size(size)) => exec_resize(core, id, size, true),
                _ => {
                    let size = resolve::size(core, id);
                    exec_resize(core, id, size, false);
                }
            }
            exec_draw(core, id);
            reposition(core, id, None)
        }
        UpdateKind::Reposition => {
            let pos = match update.payload {
                Some(Payload::Pos(p)) => Some(p),
                _ => None,
            };
            reposition(core, id, pos)
        }
        UpdateKind::Status => {
            if let Some(Payload::State(state)) = update.payload {
                exec_status(core, id, state);
            }
            false
        }
        UpdateKind::Redraw => {
            exec_draw(core, id);
            false
        }
        UpdateKind::Update => {
            core.dispatch(id, |t, n| t.update(n));
            false
        }
        UpdateKind::Show => exec_show(core, id),
        UpdateKind::Hide => exec_hide(core, id),
        UpdateKind::Resort => {
            sort_children(core, parent);
            false
        }
        UpdateKind::Repaint => {
            exec_refresh(core, id);
            false
        }
        UpdateKind::Destroy => {
            exec_refresh(core, id);
            exec_destroy(core, id)
        }
        UpdateKind::Reflow => true,
    }
}

/// Recompute a widget's position. Flow widgets are left to flow layout, and
/// the return value reports whether one was seen.
fn reposition(core: &mut Core, id: NodeId, requested: Option<Point>) -> bool {
    let Some(node) = core.nodes.get_mut(id) else {
        return false;
    };
    if node.position.is_flow() {
        return true;
    }
    let target = match requested {
        Some(p) if node.align == Align::None => {
            if let Length::Px(_) = node.spec.x {
                node.spec.x = Length::Px(p.x);
            }
            if let Length::Px(_) = node.spec.y {
                node.spec.y = Length::Px(p.y);
            }
            p
        }
        _ => resolve::position(core, id),
    };
    exec_move(core, id, target);
    false
}

/// Move a widget, clamped to its position bounds. The vacated and newly
/// covered areas are invalidated in the container.
pub(crate) fn exec_move(core: &mut Core, id: NodeId, pos: Point) {
    let limits = resolve::limits(core, id);
    let Some(node) = core.nodes.get_mut(id) else {
        return;
    };
    node.limits = limits;
    let pos = pos.clamp_between(limits.min_pos, limits.max_pos);
    if pos == node.pos {
        return;
    }
    let old = node.rect();
    node.pos = pos;
    let new = node.rect();
    trace!(?id, ?pos, "moved");
    if node.visible
        && let Some(parent) = node.parent
    {
        dirty::mark_dirty(core, parent, old);
        dirty::mark_dirty(core, parent, new);
    }
}

/// Resize a widget, clamped to its size bounds. When `explicit`, pixel
/// sizes in the declarative spec are replaced so the size survives later
/// re-resolution.
fn exec_resize(core: &mut Core, id: NodeId, size: Expanse, explicit: bool) {
    let limits = resolve::limits(core, id);
    let Some(node) = core.nodes.get_mut(id) else {
        return;
    };
    node.limits = limits;
    let size = size.clamp_between(limits.min_size, limits.max_size);
    if explicit {
        if let Length::Px(_) = node.spec.w {
            node.spec.w = Length::Px(size.w);
        }
        if let Length::Px(_) = node.spec.h {
            node.spec.h = Length::Px(size.h);
        }
    }
    if size == node.size {
        return;
    }
    let old = node.rect();
    node.size = size;
    let new = node.rect();
    let parent = node.parent;
    if node.visible
        && let Some(parent) = parent
    {
        dirty::mark_dirty(core, parent, old);
        dirty::mark_dirty(core, parent, new);
    }
    trace!(?id, ?size, "resized");

    core.dispatch(id, |t, n| t.resize(n));

    if let Some(node) = core.nodes.get(id) {
        for child in &node.children {
            node.updates
                .record(PendingUpdate::new(*child, UpdateKind::Resize), false);
        }
    }

    let Some(parent) = parent.filter(|p| *p != core.root) else {
        return;
    };
    let Some(p) = core.nodes.get(parent) else {
        return;
    };
    let Some(mode) = p.auto_size else {
        return;
    };
    let bounds = children_extent(core, parent);
    let target = match mode {
        AutoSizeMode::GrowAndShrink => bounds,
        AutoSizeMode::GrowOnly => bounds.max(p.size),
    };
    if mutate::valid_size(target) && target != p.size {
        debug!(container = ?parent, ?target, "auto-size container");
        core.record(parent, UpdateKind::Resize, Some(Payload::Size(target)), false);
    }
}

/// The smallest size that covers every child's outer rectangle.
fn children_extent(core: &Core, container: NodeId) -> Expanse {
    core.children(container)
        .iter()
        .filter_map(|c| core.nodes.get(*c))
        .fold(Expanse::default(), |acc, n| {
            let r = n.rect();
            acc.max(Expanse::new(r.right(), r.bottom()))
        })
}

/// Call the update and draw hooks, then repaint the widget's area.
fn exec_draw(core: &mut Core, id: NodeId) {
    core.dispatch(id, |t, n| t.update(n));
    core.dispatch(id, |t, n| t.draw(n));
    exec_refresh(core, id);
}

/// Invalidate a visible widget's whole area in its container.
fn exec_refresh(core: &Core, id: NodeId) {
    let Some(node) = core.nodes.get(id) else {
        return;
    };
    if node.visible
        && let Some(parent) = node.parent
    {
        dirty::mark_dirty(core, parent, node.rect());
    }
}

/// Apply a requested state, redrawing only if it changed.
fn exec_status(core: &mut Core, id: NodeId, requested: WidgetState) {
    let Some(node) = core.nodes.get_mut(id) else {
        return;
    };
    let Some(state) = mutate::effective_state(node, requested) else {
        trace!(?id, ?requested, "state not handled by widget");
        return;
    };
    if state == node.state {
        return;
    }
    node.state = state;
    exec_draw(core, id);
}

/// Make a hidden widget visible and raise it within its z band.
fn exec_show(core: &mut Core, id: NodeId) -> bool {
    if core.nodes.get(id).is_none_or(|n| n.visible) {
        return false;
    }
    core.dispatch(id, |t, n| t.show(n));
    if let Some(node) = core.nodes.get_mut(id) {
        node.visible = true;
    }
    bring_to_front(core, id);
    exec_refresh(core, id);
    trace!(?id, "shown");
    true
}

/// Hide a visible widget. The container loses its focus if the widget held
/// it.
fn exec_hide(core: &mut Core, id: NodeId) -> bool {
    if core.nodes.get(id).is_none_or(|n| !n.visible) {
        return false;
    }
    core.dispatch(id, |t, n| t.hide(n));
    let Some(node) = core.nodes.get_mut(id) else {
        return false;
    };
    node.visible = false;
    let rect = node.rect();
    if let Some(parent) = node.parent {
        dirty::mark_dirty(core, parent, rect);
        if let Some(p) = core.nodes.get_mut(parent)
            && p.focus == Some(id)
        {
            p.focus = None;
        }
    }
    trace!(?id, "hidden");
    true
}

/// Move a widget in front of every sibling with an equal or lower z index.
fn bring_to_front(core: &mut Core, id: NodeId) {
    let Some(node) = core.nodes.get(id) else {
        return;
    };
    let z = node.z_index;
    let Some(parent) = node.parent else {
        return;
    };
    let mut order: Vec<NodeId> = core
        .children(parent)
        .iter()
        .copied()
        .filter(|c| *c != id)
        .collect();
    let at = order
        .iter()
        .position(|c| core.nodes.get(*c).is_some_and(|n| n.z_index <= z))
        .unwrap_or(order.len());
    order.insert(at, id);
    if let Some(p) = core.nodes.get_mut(parent) {
        p.children = order;
    }
}

/// Stable-sort a container's children: modal first, then by descending z.
/// Visible children are repainted if the order changed.
fn sort_children(core: &mut Core, container: NodeId) {
    let mut keyed: Vec<(bool, i32, NodeId)> = core
        .children(container)
        .iter()
        .filter_map(|c| core.nodes.get(*c).map(|n| (n.modal, n.z_index, *c)))
        .collect();
    keyed.sort_by_key(|(modal, z, _)| (Reverse(*modal), Reverse(*z)));
    let sorted: Vec<NodeId> = keyed.into_iter().map(|(_, _, c)| c).collect();
    if sorted.as_slice() == core.children(container) {
        return;
    }
    if let Some(node) = core.nodes.get_mut(container) {
        node.children = sorted;
    }
    for child in core.children(container) {
        exec_refresh(core, *child);
    }
}

/// Destroy a widget and its subtree. Destroy hooks run children first, and
/// every focus reference into the subtree is cleared. Returns true if the
/// container needs flow layout.
fn exec_destroy(core: &mut Core, id: NodeId) -> bool {
    let Some(node) = core.nodes.get(id) else {
        return false;
    };
    let Some(parent) = node.parent else {
        return false;
    };
    let flow = node.position.is_flow() && node.visible;
    let order = core.subtree_post_order(id);
    for n in &order {
        core.dispatch(*n, |t, node| t.destroy(node));
    }
    if let Some(p) = core.nodes.get_mut(parent) {
        p.children.retain(|c| *c != id);
        if p.focus == Some(id) {
            p.focus = None;
        }
    }
    for n in &order {
        core.nodes.remove(*n);
    }
    debug!(?id, count = order.len(), "destroyed widget subtree");
    flow
}
