//! Pending update records and the per-container queues that hold them.

use std::collections::VecDeque;

use geom::{Expanse, Point};
use parking_lot::Mutex;

use crate::{id::NodeId, state::WidgetState};

/// The kind of deferred operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateKind {
    /// Move to a position, or recompute the position.
    Reposition,
    /// Resize, or recompute the size. Always followed by a reposition.
    Resize,
    /// Change the interaction state; redraws only on change.
    Status,
    /// Redraw the widget.
    Redraw,
    /// Run the widget type's update hook.
    Update,
    /// Make visible and raise.
    Show,
    /// Make invisible.
    Hide,
    /// Re-sort the container's children by stacking order.
    Resort,
    /// Repaint the widget's area in its container.
    Repaint,
    /// Unlink and free the widget and its subtree.
    Destroy,
    /// Re-run flow layout in the widget's container.
    Reflow,
}

/// Optional typed data carried by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Target position.
    Pos(Point),
    /// Target size.
    Size(Expanse),
    /// Target state.
    State(WidgetState),
}

/// A deferred operation on one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingUpdate {
    /// The widget the operation applies to. Not an owning reference: the
    /// widget may be gone by the time the entry drains.
    pub target: NodeId,
    /// Operation kind.
    pub kind: UpdateKind,
    /// Optional payload.
    pub payload: Option<Payload>,
}

impl PendingUpdate {
    /// Construct an update without a payload.
    pub fn new(target: NodeId, kind: UpdateKind) -> Self {
        Self {
            target,
            kind,
            payload: None,
        }
    }

    /// Construct an update with a payload.
    pub fn with_payload(target: NodeId, kind: UpdateKind, payload: Payload) -> Self {
        Self {
            target,
            kind,
            payload: Some(payload),
        }
    }

    /// Entries coalesce when they share target, kind, and payload presence.
    fn same_slot(&self, other: &Self) -> bool {
        self.target == other.target
            && self.kind == other.kind
            && self.payload.is_some() == other.payload.is_some()
    }
}

/// A FIFO of pending updates owned by one container. Any thread may record
/// into it; the lock is held only for the list mutation.
#[derive(Debug, Default)]
pub struct UpdateQueue {
    /// Queued entries, oldest first.
    entries: Mutex<VecDeque<PendingUpdate>>,
}

impl UpdateQueue {
    /// Construct an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an update. An existing entry for the same widget, kind and
    /// payload presence has its payload overwritten instead of a new entry
    /// being appended. With `allow_dup`, one extra entry may be in flight:
    /// the first match is skipped and only a second match is overwritten.
    pub fn record(&self, update: PendingUpdate, allow_dup: bool) {
        let mut entries = self.entries.lock();
        let mut seen = 0;
        for entry in entries.iter_mut() {
            if !entry.same_slot(&update) {
                continue;
            }
            seen += 1;
            if allow_dup && seen < 2 {
                continue;
            }
            entry.payload = update.payload;
            return;
        }
        entries.push_back(update);
    }

    /// Remove and return the oldest entry.
    pub(crate) fn pop_front(&self) -> Option<PendingUpdate> {
        self.entries.lock().pop_front()
    }

    /// Remove every entry targeting `target`, oldest first.
    pub(crate) fn take_for(&self, target: NodeId) -> Vec<PendingUpdate> {
        let mut entries = self.entries.lock();
        let (taken, kept): (Vec<_>, Vec<_>) = entries.drain(..).partition(|e| e.target == target);
        *entries = kept.into();
        taken
    }

    /// Append entries as they are, without coalescing.
    pub(crate) fn append(&self, updates: impl IntoIterator<Item = PendingUpdate>) {
        self.entries.lock().extend(updates);
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Copy of the queued entries, oldest first.
    pub fn snapshot(&self) -> Vec<PendingUpdate> {
        self.entries.lock().iter().copied().collect()
    }
}
