//! Arena entries and their declarative geometry.

use std::{any::Any, fmt, sync::Arc};

use geom::{Edges, Expanse, Point, Rect};

use crate::{
    align::Align,
    dirty::DirtyQueue,
    id::{NodeId, WidgetTypeId},
    length::Length,
    state::{AutoSizeMode, Dock, PositionMode, WidgetState},
    style::{Background, Border, ClickableAlpha},
    update::UpdateQueue,
};

/// Declarative geometry. Unset bounds are unconstrained.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct GeometrySpec {
    /// X coordinate.
    pub x: Length,
    /// Y coordinate.
    pub y: Length,
    /// Width.
    pub w: Length,
    /// Height.
    pub h: Length,
    /// Lowest allowed x.
    pub min_x: Option<Length>,
    /// Lowest allowed y.
    pub min_y: Option<Length>,
    /// Highest allowed x.
    pub max_x: Option<Length>,
    /// Highest allowed y.
    pub max_y: Option<Length>,
    /// Smallest allowed width.
    pub min_w: Option<Length>,
    /// Smallest allowed height.
    pub min_h: Option<Length>,
    /// Largest allowed width.
    pub max_w: Option<Length>,
    /// Largest allowed height.
    pub max_h: Option<Length>,
}

/// Resolved position and size bounds, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Lowest position.
    pub min_pos: Point,
    /// Highest position.
    pub max_pos: Point,
    /// Smallest size.
    pub min_size: Expanse,
    /// Largest size.
    pub max_size: Expanse,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_pos: Point::new(i32::MIN, i32::MIN),
            max_pos: Point::new(i32::MAX, i32::MAX),
            min_size: Expanse::new(0, 0),
            max_size: Expanse::new(i32::MAX, i32::MAX),
        }
    }
}

/// Widget data stored in the arena.
pub struct Node {
    /// This node's id.
    pub(crate) id: NodeId,
    /// Registered type, if any.
    pub(crate) type_id: Option<WidgetTypeId>,
    /// Registered type name, if any.
    pub(crate) type_name: Option<String>,
    /// Application-assigned numeric id used by child lookup.
    pub(crate) user_id: Option<u32>,

    /// Parent container. Only the root has none.
    pub(crate) parent: Option<NodeId>,
    /// Children, front-most first.
    pub(crate) children: Vec<NodeId>,

    /// Declarative geometry.
    pub(crate) spec: GeometrySpec,
    /// Resolved position, relative to the container's content origin.
    pub(crate) pos: Point,
    /// Resolved outer size.
    pub(crate) size: Expanse,
    /// Resolved bounds.
    pub(crate) limits: Limits,

    /// Positioning mode.
    pub(crate) position: PositionMode,
    /// Alignment for absolute positioning.
    pub(crate) align: Align,
    /// Offset added to aligned and relative positions.
    pub(crate) offset: Point,
    /// Dock mode.
    pub(crate) dock: Dock,

    /// Visibility. New widgets start hidden.
    pub(crate) visible: bool,
    /// Whether the widget accepts interaction.
    pub(crate) enabled: bool,
    /// Whether the widget can take focus.
    pub(crate) focusable: bool,
    /// Modal widgets stack above all non-modal siblings.
    pub(crate) modal: bool,
    /// Focused child, for containers.
    pub(crate) focus: Option<NodeId>,
    /// Stacking index.
    pub(crate) z_index: i32,
    /// Current interaction state.
    pub(crate) state: WidgetState,
    /// States this widget responds to.
    pub(crate) valid_states: WidgetState,

    /// Inner spacing; children are positioned inside it.
    pub(crate) padding: Edges,
    /// Outer spacing.
    pub(crate) margin: Edges,
    /// Border.
    pub(crate) border: Border,
    /// Background.
    pub(crate) background: Background,
    /// Hit-test pass-through policy.
    pub(crate) clickable: ClickableAlpha,
    /// Auto-size policy, when enabled.
    pub(crate) auto_size: Option<AutoSizeMode>,
    /// Flow layout must run for this node's children at the next drain.
    pub(crate) needs_reflow: bool,

    /// Per-type private data.
    pub(crate) data: Option<Box<dyn Any + Send + Sync>>,

    /// Updates for this node's children.
    pub(crate) updates: Arc<UpdateQueue>,
    /// Dirty rectangles in this node's outer coordinates.
    pub(crate) dirty: Arc<DirtyQueue>,
}

impl Node {
    /// Construct a hidden, unparented node with default geometry.
    pub(crate) fn new(id: NodeId, type_id: Option<WidgetTypeId>, type_name: Option<&str>) -> Self {
        Self {
            id,
            type_id,
            type_name: type_name.map(str::to_string),
            user_id: None,
            parent: None,
            children: Vec::new(),
            spec: GeometrySpec::default(),
            pos: Point::zero(),
            size: Expanse::default(),
            limits: Limits::default(),
            position: PositionMode::default(),
            align: Align::default(),
            offset: Point::zero(),
            dock: Dock::default(),
            visible: false,
            enabled: true,
            focusable: true,
            modal: false,
            focus: None,
            z_index: 0,
            state: WidgetState::NORMAL,
            valid_states: WidgetState::empty(),
            padding: Edges::default(),
            margin: Edges::default(),
            border: Border::default(),
            background: Background::default(),
            clickable: ClickableAlpha::default(),
            auto_size: None,
            needs_reflow: false,
            data: None,
            updates: Arc::new(UpdateQueue::new()),
            dirty: Arc::new(DirtyQueue::new()),
        }
    }

    /// Return the node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Return the registered type id.
    pub fn type_id(&self) -> Option<WidgetTypeId> {
        self.type_id
    }

    /// Return the registered type name.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Return the application-assigned id.
    pub fn user_id(&self) -> Option<u32> {
        self.user_id
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children, front-most first.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the declarative geometry.
    pub fn spec(&self) -> &GeometrySpec {
        &self.spec
    }

    /// Return the resolved position within the container's content box.
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Return the resolved size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Return the resolved rectangle within the container's content box.
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.pos, self.size)
    }

    /// Return the size of the content box (size minus padding).
    pub fn content_size(&self) -> Expanse {
        self.padding.shrink(self.size)
    }

    /// Return the resolved bounds.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Return the positioning mode.
    pub fn position_mode(&self) -> PositionMode {
        self.position
    }

    /// Return the alignment.
    pub fn align(&self) -> Align {
        self.align
    }

    /// Return the alignment or relative offset.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Return the dock mode.
    pub fn dock(&self) -> Dock {
        self.dock
    }

    /// Return true if the node is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Return true if the node is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Return true if the node can take focus.
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Return true if the node is modal.
    pub fn is_modal(&self) -> bool {
        self.modal
    }

    /// Return the stacking index.
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Return the interaction state.
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Return the mask of states the node responds to.
    pub fn valid_states(&self) -> WidgetState {
        self.valid_states
    }

    /// Return the padding.
    pub fn padding(&self) -> Edges {
        self.padding
    }

    /// Return the margin.
    pub fn margin(&self) -> Edges {
        self.margin
    }

    /// Return the border.
    pub fn border(&self) -> Border {
        self.border
    }

    /// Return the background.
    pub fn background(&self) -> Background {
        self.background
    }

    /// Return the clickable-alpha policy.
    pub fn clickable_alpha(&self) -> ClickableAlpha {
        self.clickable
    }

    /// Return the auto-size policy, if enabled.
    pub fn auto_size(&self) -> Option<AutoSizeMode> {
        self.auto_size
    }

    /// Return the private data if it has type `T`.
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.as_deref()?.downcast_ref()
    }

    /// Return the private data mutably if it has type `T`.
    pub fn data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.data.as_deref_mut()?.downcast_mut()
    }

    /// Replace the private data.
    pub fn set_data<T: Any + Send + Sync>(&mut self, data: T) {
        self.data = Some(Box::new(data));
    }

    /// Drop the private data.
    pub fn clear_data(&mut self) {
        self.data = None;
    }

    /// Return the number of updates queued for this node's children.
    pub fn pending_updates(&self) -> usize {
        self.updates.len()
    }

    /// Return the number of dirty rectangles awaiting propagation.
    pub fn pending_dirty(&self) -> usize {
        self.dirty.len()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("pos", &self.pos)
            .field("size", &self.size)
            .field("visible", &self.visible)
            .field("z_index", &self.z_index)
            .finish_non_exhaustive()
    }
}
