//! The widget arena and its public API.

use std::{
    any::Any,
    collections::HashSet,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use geom::{Edges, Expanse, Point, Rect};
use slotmap::SlotMap;
use tracing::{debug, trace, warn};

use crate::{
    align::Align,
    config::Config,
    dirty, hit,
    error::{Error, Result},
    id::NodeId,
    length::Length,
    mutate,
    node::Node,
    registry::{Registry, WidgetType},
    remote::Remote,
    scheduler,
    state::{AutoSizeMode, Dock, PositionMode, WidgetState},
    style::{BackgroundLayout, Border, ClickableAlpha, ImageHandle, Rgb},
    update::{Payload, PendingUpdate, UpdateKind},
};

/// The widget arena, the type registry and the update engine.
///
/// Widgets live in a slotmap arena under a synthetic root container whose
/// size is the screen. Declarative setters take `&mut self` and store their
/// value immediately; requests that change layout or visibility take `&self`
/// and only enqueue a [`PendingUpdate`] in the widget's container. Queued
/// work is applied by [`Core::process_updates`], once per tick.
pub struct Core {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    pub(crate) root: NodeId,
    /// Registered widget types.
    pub(crate) registry: Registry,
    /// Runtime configuration.
    pub(crate) config: Config,
    /// Whether widgets may be constructed and updates drained.
    active: bool,
    /// Set whenever a visible region is invalidated.
    pub(crate) needs_sync: Arc<AtomicBool>,
}

impl Default for Core {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Core {
    /// Create an inactive Core with an empty registry and a root sized to
    /// the configured screen.
    pub fn new(config: Config) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert_with_key(|id| {
            let mut node = Node::new(id, None, None);
            node.visible = true;
            node.size = config.screen();
            node
        });
        Self {
            nodes,
            root,
            registry: Registry::new(),
            config,
            active: false,
            needs_sync: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark the runtime as active. Widgets can only be created, and updates
    /// drained, while active.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Mark the runtime as inactive.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Return true if the runtime is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Return the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return the type registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Return the type registry mutably, for registration.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Return a reference to a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Return true if the id refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live widgets, excluding the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True if no widgets exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the screen size.
    pub fn screen_size(&self) -> Expanse {
        self.config.screen()
    }

    /// Change the screen size. Top-level widgets re-resolve their geometry at
    /// the next drain, and the whole screen is invalidated.
    pub fn set_screen_size(&mut self, size: Expanse) {
        if !mutate::valid_size(size) {
            warn!(?size, "ignoring non-positive screen size");
            return;
        }
        self.config.screen_width = size.w;
        self.config.screen_height = size.h;
        let root = self.root;
        if let Some(node) = self.nodes.get_mut(root) {
            node.size = size;
            node.needs_reflow = true;
            for child in &node.children {
                node.updates
                    .record(PendingUpdate::new(*child, UpdateKind::Resize), false);
            }
        }
        dirty::mark_dirty(self, root, size.rect());
    }

    /// Mutable access to a widget. The root is not a widget.
    fn widget_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id == self.root {
            return None;
        }
        self.nodes.get_mut(id)
    }

    /// Enqueue an update in the queue of the widget's container. Returns
    /// false if the widget is unknown or is the root.
    pub(crate) fn record(
        &self,
        id: NodeId,
        kind: UpdateKind,
        payload: Option<Payload>,
        allow_dup: bool,
    ) -> bool {
        let Some(parent) = self.nodes.get(id).and_then(|n| n.parent) else {
            trace!(?id, ?kind, "ignoring request for missing widget or root");
            return false;
        };
        let Some(container) = self.nodes.get(parent) else {
            return false;
        };
        container.updates.record(
            PendingUpdate {
                target: id,
                kind,
                payload,
            },
            allow_dup,
        );
        true
    }

    /// Run a closure with a widget's type hooks and the widget itself.
    pub(crate) fn dispatch(&mut self, id: NodeId, f: impl FnOnce(&dyn WidgetType, &mut Node)) {
        let Some(type_id) = self.nodes.get(id).map(|n| n.type_id) else {
            return;
        };
        let kind = self.registry.resolve(type_id);
        if let Some(node) = self.nodes.get_mut(id) {
            f(kind.as_ref(), node);
        }
    }

    /// Create a widget of a registered type, or an untyped widget. The new
    /// widget is hidden and attached to the root, behind its siblings.
    ///
    /// Fails with [`Error::NotActive`] before [`Core::activate`], and with
    /// [`Error::UnknownType`] for an unregistered name; in both cases nothing
    /// is inserted.
    pub fn create_widget(&mut self, type_name: Option<&str>) -> Result<NodeId> {
        if !self.active {
            return Err(Error::NotActive);
        }
        let type_id = match type_name {
            Some(name) => Some(self.registry.id_of(name).ok_or_else(|| {
                warn!(name, "cannot create widget of unknown type");
                Error::UnknownType(name.to_string())
            })?),
            None => None,
        };
        let root = self.root;
        let id = self.nodes.insert_with_key(|id| {
            let mut node = Node::new(id, type_id, type_name);
            node.parent = Some(root);
            node
        });
        if let Some(node) = self.nodes.get_mut(root) {
            node.children.push(id);
        }
        debug!(?id, type_name, "created widget");
        self.dispatch(id, |t, n| t.init(n));
        Ok(id)
    }

    /// Return true if `ancestor` appears in the parent chain of `node`.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Move a widget into a container, or to the top level when `container`
    /// is `None`. The widget is appended behind its new siblings, the old
    /// container loses its focus if the widget held it, and the widget's
    /// geometry is recomputed at the next drain.
    pub fn attach(&mut self, child: NodeId, container: Option<NodeId>) -> Result<()> {
        let target = container.unwrap_or(self.root);
        if child == self.root {
            return Err(Error::RootOperation("the root cannot be attached".into()));
        }
        let Some(node) = self.nodes.get(child) else {
            return Err(Error::NodeNotFound(child));
        };
        if !self.nodes.contains_key(target) {
            return Err(Error::NodeNotFound(target));
        }
        let old_parent = node.parent;
        if old_parent == Some(target) {
            return Ok(());
        }
        if self.is_ancestor(child, target) {
            warn!(?child, ?target, "rejecting attach that would create a cycle");
            return Err(Error::WouldCreateCycle {
                parent: target,
                child,
            });
        }
        let flow = node.position.is_flow();
        let relative_size = node.spec.w.is_relative() || node.spec.h.is_relative();
        let vacated = node.visible.then(|| node.rect());

        if let Some(old) = old_parent {
            if let Some(p) = self.nodes.get_mut(old) {
                p.children.retain(|c| *c != child);
                if p.focus == Some(child) {
                    p.focus = None;
                }
                p.needs_reflow |= flow;
            }
            if let Some(rect) = vacated {
                dirty::mark_dirty(self, old, rect);
            }
        }
        if let Some(p) = self.nodes.get_mut(target) {
            p.children.push(child);
            p.needs_reflow |= flow;
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(target);
        }
        let carried = old_parent
            .and_then(|old| self.nodes.get(old))
            .map(|p| p.updates.take_for(child))
            .unwrap_or_default();
        if !carried.is_empty() {
            trace!(?child, count = carried.len(), "carrying queued updates to new container");
            if let Some(p) = self.nodes.get(target) {
                p.updates.append(carried);
            }
        }
        if relative_size {
            self.record(child, UpdateKind::Resize, None, false);
        }
        self.record(child, UpdateKind::Reposition, None, false);
        debug!(?child, ?target, "attached widget");
        self.debug_assert_tree_invariants();
        Ok(())
    }

    /// Return the widget's container. Only the root has none.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Return a node's children, front-most first.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Return the sibling directly behind this widget.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let idx = siblings.iter().position(|c| *c == id)?;
        siblings.get(idx + 1).copied()
    }

    /// Return the sibling directly in front of this widget.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let idx = siblings.iter().position(|c| *c == id)?;
        idx.checked_sub(1).and_then(|i| siblings.get(i).copied())
    }

    /// Assign an application-level numeric id.
    pub fn set_user_id(&mut self, id: NodeId, user_id: u32) {
        if let Some(node) = self.widget_mut(id) {
            node.user_id = Some(user_id);
        }
    }

    /// Find a direct child by application-level id.
    pub fn find_child_by_id(&self, container: NodeId, user_id: u32) -> Option<NodeId> {
        self.children(container)
            .iter()
            .copied()
            .find(|c| self.nodes.get(*c).is_some_and(|n| n.user_id == Some(user_id)))
    }

    /// Find the nearest ancestor (excluding the widget itself) of a type.
    pub fn find_typed_ancestor(&self, id: NodeId, type_name: &str) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            let node = self.nodes.get(ancestor)?;
            if node.type_name.as_deref() == Some(type_name) {
                return Some(ancestor);
            }
            current = node.parent;
        }
        None
    }

    /// Screen position of a widget's outer top-left corner.
    pub fn global_pos(&self, id: NodeId) -> Option<Point> {
        let mut pos = Point::zero();
        let mut current = id;
        loop {
            let node = self.nodes.get(current)?;
            let Some(parent) = node.parent else {
                break;
            };
            let p = self.nodes.get(parent)?;
            pos = pos + node.pos + p.padding.origin();
            current = parent;
        }
        Some(pos)
    }

    /// Convert a screen point into a widget's outer coordinates.
    pub fn global_to_local(&self, id: NodeId, p: Point) -> Option<Point> {
        Some(p - self.global_pos(id)?)
    }

    /// Set whether a widget may take focus.
    pub fn set_focusable(&mut self, id: NodeId, focusable: bool) {
        if let Some(node) = self.widget_mut(id) {
            node.focusable = focusable;
        }
    }

    /// Focus a widget, making it the focused child of its container and each
    /// ancestor the focused child of its own container. Returns false if the
    /// widget cannot take focus.
    pub fn set_focus(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if id == self.root || !node.focusable || !node.enabled {
            return false;
        }
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.focus = Some(current);
            }
            current = parent;
        }
        true
    }

    /// Return the focused child of a container.
    pub fn focused_child(&self, container: NodeId) -> Option<NodeId> {
        self.nodes.get(container).and_then(|n| n.focus)
    }

    /// True if the widget is its container's focused child.
    pub fn has_focus(&self, id: NodeId) -> bool {
        self.parent(id)
            .is_some_and(|p| self.focused_child(p) == Some(id))
    }

    /// True if the widget and every ancestor below the root hold focus.
    pub fn has_global_focus(&self, id: NodeId) -> bool {
        if id == self.root || !self.nodes.contains_key(id) {
            return false;
        }
        let mut current = id;
        while current != self.root {
            if !self.has_focus(current) {
                return false;
            }
            match self.parent(current) {
                Some(p) => current = p,
                None => return false,
            }
        }
        true
    }

    /// Set the declarative position. `None` leaves an axis unchanged.
    pub fn set_pos(&mut self, id: NodeId, x: Option<Length>, y: Option<Length>) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        if let Some(x) = x {
            node.spec.x = x;
        }
        if let Some(y) = y {
            node.spec.y = y;
        }
        self.record(id, UpdateKind::Reposition, None, false);
    }

    /// Set the declarative size. `None` leaves an axis unchanged, as does an
    /// axis controlled by the dock mode.
    pub fn set_size(&mut self, id: NodeId, w: Option<Length>, h: Option<Length>) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        mutate::apply_size_spec(node, w, h);
        self.record(id, UpdateKind::Resize, None, false);
    }

    /// Set the declarative minimum size. `None` removes an axis's bound.
    pub fn set_min_size(&mut self, id: NodeId, w: Option<Length>, h: Option<Length>) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.spec.min_w = w;
        node.spec.min_h = h;
        self.record(id, UpdateKind::Resize, None, false);
    }

    /// Set the declarative maximum size. `None` removes an axis's bound.
    pub fn set_max_size(&mut self, id: NodeId, w: Option<Length>, h: Option<Length>) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.spec.max_w = w;
        node.spec.max_h = h;
        self.record(id, UpdateKind::Resize, None, false);
    }

    /// Limit the size to a pixel range. Negative bounds become zero and the
    /// maximum is raised to the minimum.
    pub fn limit_size(&mut self, id: NodeId, min: Expanse, max: Expanse) {
        let (min, max) = mutate::correct_size_range(min, max);
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.spec.min_w = Some(Length::Px(min.w));
        node.spec.min_h = Some(Length::Px(min.h));
        node.spec.max_w = Some(Length::Px(max.w));
        node.spec.max_h = Some(Length::Px(max.h));
        node.limits.min_size = min;
        node.limits.max_size = max;
        self.record(id, UpdateKind::Resize, None, false);
    }

    /// Limit the position to a pixel range. Negative bounds become zero and
    /// the maximum is raised to the minimum.
    pub fn limit_pos(&mut self, id: NodeId, min: Point, max: Point) {
        let (min, max) = mutate::correct_pos_range(min, max);
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.spec.min_x = Some(Length::Px(min.x));
        node.spec.min_y = Some(Length::Px(min.y));
        node.spec.max_x = Some(Length::Px(max.x));
        node.spec.max_y = Some(Length::Px(max.y));
        node.limits.min_pos = min;
        node.limits.max_pos = max;
        self.record(id, UpdateKind::Reposition, None, false);
    }

    /// Change the positioning mode. The container re-runs flow layout.
    pub fn set_position_mode(&mut self, id: NodeId, mode: PositionMode) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.position = mode;
        self.record(id, UpdateKind::Reflow, None, false);
        self.record(id, UpdateKind::Reposition, None, false);
    }

    /// Set the alignment and its offset.
    pub fn set_align(&mut self, id: NodeId, align: Align, offset: Point) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.align = align;
        node.offset = offset;
        self.record(id, UpdateKind::Reposition, None, false);
    }

    /// Set the offset used by alignment and relative positioning.
    pub fn set_offset(&mut self, id: NodeId, offset: Point) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.offset = offset;
        self.record(id, UpdateKind::Reposition, None, false);
    }

    /// Dock the widget to an edge of its container.
    pub fn set_dock(&mut self, id: NodeId, dock: Dock) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        mutate::apply_dock(node, dock);
        self.record(id, UpdateKind::Resize, None, false);
    }

    /// Set the padding. Every child re-resolves against the new content box.
    pub fn set_padding(&mut self, id: NodeId, padding: Edges) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.padding = padding;
        node.needs_reflow = true;
        for child in &node.children {
            node.updates
                .record(PendingUpdate::new(*child, UpdateKind::Resize), false);
        }
        self.record(id, UpdateKind::Redraw, None, false);
    }

    /// Set the margin. The container re-runs flow layout.
    pub fn set_margin(&mut self, id: NodeId, margin: Edges) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.margin = margin;
        self.record(id, UpdateKind::Reflow, None, false);
    }

    /// Set the border.
    pub fn set_border(&mut self, id: NodeId, border: Border) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.border = border;
        self.record(id, UpdateKind::Redraw, None, false);
    }

    /// Set the background colour.
    pub fn set_background_color(&mut self, id: NodeId, color: Rgb) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.background.color = color;
        self.record(id, UpdateKind::Redraw, None, false);
    }

    /// Set or clear the background image.
    pub fn set_background_image(&mut self, id: NodeId, image: Option<ImageHandle>) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.background.image = image;
        self.record(id, UpdateKind::Redraw, None, false);
    }

    /// Set whether the background fill is skipped.
    pub fn set_background_transparent(&mut self, id: NodeId, transparent: bool) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.background.transparent = transparent;
        self.record(id, UpdateKind::Redraw, None, false);
    }

    /// Set the background image layout.
    pub fn set_background_layout(&mut self, id: NodeId, layout: BackgroundLayout) {
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.background.layout = layout;
        self.record(id, UpdateKind::Redraw, None, false);
    }

    /// Set the clickable-alpha hit-test policy.
    pub fn set_clickable_alpha(&mut self, id: NodeId, policy: ClickableAlpha) {
        if let Some(node) = self.widget_mut(id) {
            node.clickable = policy;
        }
    }

    /// Set the stacking index, clamped to the modal or non-modal band. The
    /// container re-sorts its children at the next drain.
    pub fn set_z_index(&mut self, id: NodeId, z: i32) {
        let config = self.config.clone();
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.z_index = mutate::clamp_z(&config, node.modal, z);
        self.record(id, UpdateKind::Resort, None, false);
    }

    /// Make a widget modal or not, re-clamping its stacking index.
    pub fn set_modal(&mut self, id: NodeId, modal: bool) {
        let config = self.config.clone();
        let Some(node) = self.widget_mut(id) else {
            return;
        };
        node.modal = modal;
        node.z_index = mutate::clamp_z(&config, modal, node.z_index);
        self.record(id, UpdateKind::Resort, None, false);
    }

    /// Enable or disable auto-sizing to the children's bounding box.
    pub fn set_auto_size(&mut self, id: NodeId, enabled: bool, mode: AutoSizeMode) {
        if let Some(node) = self.widget_mut(id) {
            node.auto_size = enabled.then_some(mode);
        }
    }

    /// Set the mask of states the widget responds to.
    pub fn set_valid_states(&mut self, id: NodeId, states: WidgetState) {
        if let Some(node) = self.widget_mut(id) {
            node.valid_states = states;
        }
    }

    /// Enable a widget and request the normal state.
    pub fn enable(&mut self, id: NodeId) {
        if let Some(node) = self.widget_mut(id) {
            node.enabled = true;
            self.set_state(id, WidgetState::NORMAL);
        }
    }

    /// Disable a widget and request the disabled state.
    pub fn disable(&mut self, id: NodeId) {
        if let Some(node) = self.widget_mut(id) {
            node.enabled = false;
            self.set_state(id, WidgetState::DISABLE);
        }
    }

    /// Replace a widget's private data.
    pub fn set_data<T: Any + Send + Sync>(&mut self, id: NodeId, data: T) -> Result<()> {
        let node = self.widget_mut(id).ok_or(Error::NodeNotFound(id))?;
        node.set_data(data);
        Ok(())
    }

    /// Return a widget's private data if it has type `T`.
    pub fn data<T: Any>(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id)?.data()
    }

    /// Request a move to a pixel position.
    pub fn move_to(&self, id: NodeId, pos: Point) {
        self.record(id, UpdateKind::Reposition, Some(Payload::Pos(pos)), false);
    }

    /// Request a move relative to the current position.
    pub fn offset_by(&self, id: NodeId, delta: Point) {
        if let Some(node) = self.nodes.get(id) {
            self.move_to(id, node.pos + delta);
        }
    }

    /// Request a pixel resize. Non-positive sizes are ignored.
    pub fn resize(&self, id: NodeId, size: Expanse) {
        if !mutate::valid_size(size) {
            warn!(?id, ?size, "ignoring non-positive resize");
            return;
        }
        self.record(id, UpdateKind::Resize, Some(Payload::Size(size)), false);
    }

    /// Request that the widget be shown and raised.
    pub fn show(&self, id: NodeId) {
        if self.record(id, UpdateKind::Show, None, false) {
            self.record(id, UpdateKind::Resort, None, false);
        }
    }

    /// Request that the widget be hidden.
    pub fn hide(&self, id: NodeId) {
        self.record(id, UpdateKind::Hide, None, false);
    }

    /// Request a redraw.
    pub fn redraw(&self, id: NodeId) {
        self.record(id, UpdateKind::Redraw, None, false);
    }

    /// Request a repaint of the widget's area.
    pub fn refresh(&self, id: NodeId) {
        self.record(id, UpdateKind::Repaint, None, false);
    }

    /// Request a call to the type's update hook.
    pub fn update(&self, id: NodeId) {
        self.record(id, UpdateKind::Update, None, false);
    }

    /// Like [`Core::update`], but allows a second request to be in flight.
    pub fn update_allow_dup(&self, id: NodeId) {
        self.record(id, UpdateKind::Update, None, true);
    }

    /// Request a state change. Applied at drain only if the widget responds
    /// to the state; disabled widgets always move to the disabled state.
    pub fn set_state(&self, id: NodeId, state: WidgetState) {
        self.record(id, UpdateKind::Status, Some(Payload::State(state)), false);
    }

    /// Request destruction of the widget and its subtree.
    pub fn destroy(&self, id: NodeId) {
        self.record(id, UpdateKind::Destroy, None, false);
    }

    /// Return the updates queued for a container's children.
    pub fn pending_updates(&self, container: NodeId) -> Vec<PendingUpdate> {
        self.nodes
            .get(container)
            .map(|n| n.updates.snapshot())
            .unwrap_or_default()
    }

    /// Drain every queue, containers before their children.
    ///
    /// # Panics
    ///
    /// Panics if the runtime is not active.
    pub fn process_updates(&mut self) {
        assert!(self.active, "process_updates called on an inactive core");
        scheduler::process(self, self.root);
        self.debug_assert_tree_invariants();
    }

    /// Record a rectangle, in the node's content coordinates, as needing
    /// repaint. For the root, coordinates are screen coordinates.
    pub fn mark_dirty(&self, id: NodeId, rect: Rect) -> bool {
        dirty::mark_dirty(self, id, rect)
    }

    /// Move every visible widget's dirty rectangles up to the root.
    ///
    /// # Panics
    ///
    /// Panics if the runtime is not active.
    pub fn propagate(&self) {
        assert!(self.active, "propagate called on an inactive core");
        dirty::propagate(self, self.root);
    }

    /// Take the dirty rectangles accumulated at the root, in screen
    /// coordinates.
    pub fn take_dirty(&self) -> Vec<Rect> {
        self.nodes
            .get(self.root)
            .map(|n| n.dirty.take())
            .unwrap_or_default()
    }

    /// Return and clear the flag set when a visible region is invalidated.
    pub fn take_needs_sync(&self) -> bool {
        self.needs_sync.swap(false, Ordering::AcqRel)
    }

    /// Return the deepest visible widget at a screen point.
    pub fn widget_at(&self, p: Point) -> Option<NodeId> {
        let root = self.nodes.get(self.root)?;
        if !root.size.rect().contains_point(p) {
            return None;
        }
        hit::locate(self, self.root, p).filter(|id| *id != self.root)
    }

    /// Hit test within a container, with `p` in the container's outer
    /// coordinates. Returns the container itself if no child matches, or
    /// `None` if the container's clickable-alpha policy ignores the point.
    pub fn hit_test(&self, container: NodeId, p: Point) -> Option<NodeId> {
        hit::locate(self, container, p)
    }

    /// A handle for enqueuing requests from other threads. The handle keeps
    /// the queue of the widget's container at the time of the call.
    pub fn remote(&self, id: NodeId) -> Option<Remote> {
        let node = self.nodes.get(id)?;
        let container = self.nodes.get(node.parent?)?;
        Some(Remote::new(
            id,
            Arc::clone(&container.updates),
            Arc::clone(&node.dirty),
            Arc::clone(&self.needs_sync),
        ))
    }

    /// Collect a subtree in post-order, including the root.
    pub(crate) fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((node_id, visited)) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            if visited {
                out.push(node_id);
                continue;
            }
            stack.push((node_id, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Assert structural invariants on the node tree in debug builds.
    #[cfg(debug_assertions)]
    pub(crate) fn debug_assert_tree_invariants(&self) {
        debug_assert!(self.nodes.contains_key(self.root), "root node missing");
        for (id, node) in self.nodes.iter() {
            self.debug_assert_node_links(id, node);
            debug_assert!(
                id == self.root || self.is_ancestor(self.root, id),
                "node {id:?} is not reachable from the root"
            );
        }
    }

    #[cfg(not(debug_assertions))]
    pub(crate) fn debug_assert_tree_invariants(&self) {}

    /// Assert parent/child link invariants for a specific node in debug builds.
    #[cfg(debug_assertions)]
    fn debug_assert_node_links(&self, id: NodeId, node: &Node) {
        debug_assert!(
            (id == self.root) == node.parent.is_none(),
            "only the root may be parentless ({id:?})"
        );
        let mut seen = HashSet::with_capacity(node.children.len());
        for child in &node.children {
            debug_assert!(
                seen.insert(*child),
                "duplicate child {child:?} under {id:?}"
            );
            let child_node = self.nodes.get(*child);
            debug_assert!(child_node.is_some(), "child {child:?} missing");
            if let Some(child_node) = child_node {
                debug_assert!(
                    child_node.parent == Some(id),
                    "child {child:?} parent mismatch under {id:?}"
                );
            }
        }
        if let Some(parent) = node.parent {
            let parent_node = self.nodes.get(parent);
            debug_assert!(parent_node.is_some(), "parent {parent:?} missing");
            if let Some(parent_node) = parent_node {
                debug_assert!(
                    parent_node.children.contains(&id),
                    "parent {parent:?} missing child {id:?}"
                );
            }
        }
        if let Some(focus) = node.focus {
            debug_assert!(
                node.children.contains(&focus),
                "focus {focus:?} is not a child of {id:?}"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;
    use crate::testing::test_core;

    #[test]
    fn create_requires_active_runtime() {
        let mut core = Core::default();
        assert_eq!(core.create_widget(None), Err(Error::NotActive));
        core.activate();
        assert!(core.create_widget(None).is_ok());
        assert_eq!(core.len(), 1);
    }

    #[test]
    fn unknown_type_inserts_nothing() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let before = core.len();
        assert_eq!(
            core.create_widget(Some("no_such_type")),
            Err(Error::UnknownType("no_such_type".into()))
        );
        assert_eq!(core.len(), before);
        assert!(core.children(core.root_id()).is_empty());
        Ok(())
    }

    #[test]
    fn attach_moves_between_containers() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let a = core.create_widget(None)?;
        let b = core.create_widget(None)?;
        let c = core.create_widget(None)?;
        core.attach(c, Some(a))?;
        assert_eq!(core.parent(c), Some(a));
        assert_eq!(core.children(core.root_id()), &[a, b]);

        assert!(core.set_focus(c));
        assert!(core.has_global_focus(c));
        core.attach(c, Some(b))?;
        assert_eq!(core.focused_child(a), None);
        assert!(!core.has_focus(c));
        assert_eq!(core.children(b), &[c]);
        assert!(core.children(a).is_empty());

        core.attach(c, None)?;
        assert_eq!(core.parent(c), Some(core.root_id()));
        assert_eq!(core.children(core.root_id()), &[a, b, c]);
        Ok(())
    }

    #[test]
    fn attach_rejects_cycles_and_root() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let a = core.create_widget(None)?;
        let b = core.create_widget(None)?;
        core.attach(b, Some(a))?;
        assert_eq!(
            core.attach(a, Some(b)),
            Err(Error::WouldCreateCycle {
                parent: b,
                child: a
            })
        );
        assert_eq!(
            core.attach(a, Some(a)),
            Err(Error::WouldCreateCycle {
                parent: a,
                child: a
            })
        );
        assert!(matches!(
            core.attach(core.root_id(), Some(a)),
            Err(Error::RootOperation(_))
        ));
        Ok(())
    }

    #[test]
    fn navigation() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let win = core.create_widget(Some(crate::testing::RECORDER))?;
        let a = core.create_widget(None)?;
        let b = core.create_widget(None)?;
        let leaf = core.create_widget(None)?;
        core.attach(a, Some(win))?;
        core.attach(b, Some(win))?;
        core.attach(leaf, Some(b))?;
        core.set_user_id(b, 7);

        assert_eq!(core.next_sibling(a), Some(b));
        assert_eq!(core.prev_sibling(b), Some(a));
        assert_eq!(core.prev_sibling(a), None);
        assert_eq!(core.next_sibling(b), None);
        assert_eq!(core.find_child_by_id(win, 7), Some(b));
        assert_eq!(core.find_child_by_id(win, 8), None);
        assert_eq!(
            core.find_typed_ancestor(leaf, crate::testing::RECORDER),
            Some(win)
        );
        assert_eq!(core.find_typed_ancestor(win, crate::testing::RECORDER), None);
        Ok(())
    }

    #[test]
    fn global_positions_include_padding() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let outer = core.create_widget(None)?;
        let inner = core.create_widget(None)?;
        core.attach(inner, Some(outer))?;
        core.set_padding(outer, Edges::new(5, 0, 0, 10));
        core.move_to(outer, Point::new(100, 50));
        core.move_to(inner, Point::new(3, 4));
        core.process_updates();
        assert_eq!(core.global_pos(inner), Some(Point::new(113, 59)));
        assert_eq!(
            core.global_to_local(inner, Point::new(120, 60)),
            Some(Point::new(7, 1))
        );
        Ok(())
    }

    #[test]
    fn focus_requires_focusable_enabled() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let a = core.create_widget(None)?;
        core.set_focusable(a, false);
        assert!(!core.set_focus(a));
        core.set_focusable(a, true);
        core.disable(a);
        assert!(!core.set_focus(a));
        core.enable(a);
        assert!(core.set_focus(a));
        assert!(!core.set_focus(core.root_id()));
        Ok(())
    }

    #[test]
    fn random_tree_keeps_invariants() -> Result<()> {
        let (mut core, _) = test_core(640, 480)?;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut live: Vec<NodeId> = Vec::new();
        for _ in 0..400 {
            match rng.random_range(0..10) {
                0..=3 => {
                    let id = core.create_widget(None)?;
                    core.resize(id, Expanse::new(rng.random_range(1..50), rng.random_range(1..50)));
                    if rng.random_bool(0.7) {
                        core.show(id);
                    }
                    live.push(id);
                }
                4..=6 if !live.is_empty() => {
                    let child = live[rng.random_range(0..live.len())];
                    let target = live[rng.random_range(0..live.len())];
                    match core.attach(child, Some(target)) {
                        Ok(()) | Err(Error::WouldCreateCycle { .. }) => {}
                        Err(e) => return Err(e),
                    }
                }
                7 if !live.is_empty() => {
                    let id = live[rng.random_range(0..live.len())];
                    core.destroy(id);
                }
                _ => {
                    core.process_updates();
                    live.retain(|id| core.contains(*id));
                }
            }
            core.debug_assert_tree_invariants();
        }
        core.process_updates();
        for (id, node) in core.nodes.iter() {
            for child in &node.children {
                assert_eq!(core.parent(*child), Some(id));
            }
        }
        Ok(())
    }
}
