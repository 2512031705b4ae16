//! Invalidation: per-widget dirty rectangles and their propagation up the
//! tree to the root, where the renderer collects them.

use std::{mem, sync::atomic::Ordering};

use geom::Rect;
use parking_lot::Mutex;
use tracing::trace;

use crate::{Core, id::NodeId};

/// Dirty rectangles awaiting propagation, in the owning widget's outer
/// coordinates. Concatenated rather than merged.
#[derive(Debug, Default)]
pub struct DirtyQueue {
    /// Queued rectangles, oldest first.
    rects: Mutex<Vec<Rect>>,
}

impl DirtyQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rectangle.
    pub fn push(&self, rect: Rect) {
        self.rects.lock().push(rect);
    }

    /// Remove and return every queued rectangle.
    pub fn take(&self) -> Vec<Rect> {
        mem::take(&mut *self.rects.lock())
    }

    /// Copy of the queued rectangles.
    pub fn snapshot(&self) -> Vec<Rect> {
        self.rects.lock().clone()
    }

    /// Number of queued rectangles.
    pub fn len(&self) -> usize {
        self.rects.lock().len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.rects.lock().is_empty()
    }
}

/// True if the node and every ancestor are visible.
fn chain_visible(core: &Core, id: NodeId) -> bool {
    let mut current = Some(id);
    while let Some(id) = current {
        let Some(node) = core.nodes.get(id) else {
            return false;
        };
        if id != core.root && !node.visible {
            return false;
        }
        current = node.parent;
    }
    true
}

/// Record `rect`, given in the node's content coordinates, as needing
/// repaint. The rectangle is shifted by the node's padding and clipped to
/// its bounds. Returns false if nothing was recorded.
pub(crate) fn mark_dirty(core: &Core, id: NodeId, rect: Rect) -> bool {
    let Some(node) = core.nodes.get(id) else {
        return false;
    };
    if rect.is_empty() {
        return false;
    }
    let rect = rect.shift(node.padding.origin());
    let Some(rect) = rect.intersect(&node.size.rect()) else {
        return false;
    };
    node.dirty.push(rect);
    if chain_visible(core, id) {
        core.needs_sync.store(true, Ordering::Release);
    }
    true
}

/// Move dirty rectangles from every visible descendant of `id` into `id`,
/// translating each into the parent's space on the way up. Children are
/// processed before their parents.
pub(crate) fn propagate(core: &Core, id: NodeId) {
    let Some(node) = core.nodes.get(id) else {
        return;
    };
    for child in node.children.iter().rev() {
        let Some(child_node) = core.nodes.get(*child) else {
            continue;
        };
        if !child_node.visible {
            continue;
        }
        propagate(core, *child);
        let bounds = child_node.size.rect();
        for rect in child_node.dirty.take() {
            // Rectangles pushed through a remote handle are not yet clipped.
            let Some(rect) = rect.intersect(&bounds) else {
                continue;
            };
            let moved = rect.shift(child_node.pos);
            trace!(from = ?child, to = ?id, ?moved, "propagate dirty rect");
            mark_dirty(core, id, moved);
        }
    }
}
