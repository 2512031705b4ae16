//! Thread-safe request handles.
//!
//! A [`Remote`] lets a worker thread enqueue requests for one widget
//! without borrowing the [`Core`](crate::Core). Requests land in the same
//! queue as requests made through the core and are applied at the next
//! drain on the owning thread.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use geom::{Expanse, Point, Rect};
use tracing::warn;

use crate::{
    dirty::DirtyQueue,
    id::NodeId,
    mutate,
    state::WidgetState,
    update::{Payload, PendingUpdate, UpdateKind, UpdateQueue},
};

/// A cloneable handle for requesting changes to one widget from any thread.
///
/// The handle holds the queue of the widget's container at the time it was
/// made. If the widget is later attached elsewhere, requests still go to
/// the old container's queue and are applied when it drains. Requests for a
/// destroyed widget are discarded at drain.
#[derive(Debug, Clone)]
pub struct Remote {
    /// The widget.
    target: NodeId,
    /// Its container's update queue.
    queue: Arc<UpdateQueue>,
    /// The widget's dirty queue.
    dirty: Arc<DirtyQueue>,
    /// Shared sync flag.
    needs_sync: Arc<AtomicBool>,
}

impl Remote {
    /// Assemble a handle.
    pub(crate) fn new(
        target: NodeId,
        queue: Arc<UpdateQueue>,
        dirty: Arc<DirtyQueue>,
        needs_sync: Arc<AtomicBool>,
    ) -> Self {
        Self {
            target,
            queue,
            dirty,
            needs_sync,
        }
    }

    /// The widget this handle addresses.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Enqueue an update for the target.
    fn send(&self, kind: UpdateKind, payload: Option<Payload>) {
        self.queue.record(
            PendingUpdate {
                target: self.target,
                kind,
                payload,
            },
            false,
        );
    }

    /// Request a move to a pixel position.
    pub fn move_to(&self, pos: Point) {
        self.send(UpdateKind::Reposition, Some(Payload::Pos(pos)));
    }

    /// Request a pixel resize. Non-positive sizes are ignored.
    pub fn resize(&self, size: Expanse) {
        if !mutate::valid_size(size) {
            warn!(target_id = ?self.target, ?size, "ignoring non-positive resize");
            return;
        }
        self.send(UpdateKind::Resize, Some(Payload::Size(size)));
    }

    /// Request that the widget be shown.
    pub fn show(&self) {
        self.send(UpdateKind::Show, None);
        self.send(UpdateKind::Resort, None);
    }

    /// Request that the widget be hidden.
    pub fn hide(&self) {
        self.send(UpdateKind::Hide, None);
    }

    /// Request a redraw.
    pub fn redraw(&self) {
        self.send(UpdateKind::Redraw, None);
    }

    /// Request a repaint of the widget's area.
    pub fn refresh(&self) {
        self.send(UpdateKind::Repaint, None);
    }

    /// Request a call to the type's update hook.
    pub fn update(&self) {
        self.send(UpdateKind::Update, None);
    }

    /// Request a state change.
    pub fn set_state(&self, state: WidgetState) {
        self.send(UpdateKind::Status, Some(Payload::State(state)));
    }

    /// Request destruction.
    pub fn destroy(&self) {
        self.send(UpdateKind::Destroy, None);
    }

    /// Record a rectangle, in the widget's outer coordinates, as needing
    /// repaint. It is clipped to the widget's bounds during propagation.
    pub fn mark_dirty(&self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        self.dirty.push(rect);
        self.needs_sync.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{error::Result, testing::test_core};

    #[test]
    fn requests_from_threads_apply_at_drain() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let ids: Vec<NodeId> = (0..4)
            .map(|_| core.create_widget(None))
            .collect::<Result<_>>()?;
        let remotes: Vec<Remote> = ids.iter().filter_map(|id| core.remote(*id)).collect();
        assert_eq!(remotes.len(), 4);

        thread::scope(|s| {
            for (i, remote) in remotes.iter().enumerate() {
                s.spawn(move || {
                    let n = i32::try_from(i).unwrap_or_default() + 1;
                    for step in 1..=50 {
                        remote.resize(Expanse::new(n * 10, step));
                    }
                    remote.move_to(Point::new(n, n));
                });
            }
        });
        // Each widget's resizes coalesce into a single entry.
        assert_eq!(core.pending_updates(core.root_id()).len(), 8);

        core.process_updates();
        for (i, id) in ids.iter().enumerate() {
            let n = i32::try_from(i).unwrap_or_default() + 1;
            let node = core.node(*id).map(|w| (w.pos(), w.size()));
            assert_eq!(node, Some((Point::new(n, n), Expanse::new(n * 10, 50))));
        }
        Ok(())
    }

    #[test]
    fn destroyed_target_is_discarded() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let id = core.create_widget(None)?;
        let remote = core.remote(id);
        core.destroy(id);
        core.process_updates();
        if let Some(remote) = remote {
            remote.resize(Expanse::new(10, 10));
            remote.show();
        }
        core.process_updates();
        assert!(!core.contains(id));
        assert!(core.pending_updates(core.root_id()).is_empty());
        Ok(())
    }

    #[test]
    fn root_has_no_remote() -> Result<()> {
        let (core, _) = test_core(800, 600)?;
        assert!(core.remote(core.root_id()).is_none());
        Ok(())
    }
}
