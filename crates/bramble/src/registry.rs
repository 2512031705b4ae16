//! Widget type registration and hook dispatch.
//!
//! A widget type is a set of lifecycle hooks. Types are either a custom
//! [`WidgetType`] implementation or a [`CallbackTable`] whose hooks can be
//! installed one at a time after registration. Hooks that are not provided
//! are no-ops.

use std::{collections::HashMap, fmt, sync::Arc};

use geom::Point;
use tracing::debug;

use crate::{
    error::{Error, Result},
    id::WidgetTypeId,
    node::Node,
};

/// Lifecycle hooks for a widget type. Every hook defaults to a no-op.
pub trait WidgetType: Send + Sync {
    /// Called once when a widget of this type is created.
    fn init(&self, _node: &mut Node) {}

    /// Called when the widget becomes visible.
    fn show(&self, _node: &mut Node) {}

    /// Called when the widget is hidden.
    fn hide(&self, _node: &mut Node) {}

    /// Called after the widget's size changes.
    fn resize(&self, _node: &mut Node) {}

    /// Called to render the widget's content.
    fn draw(&self, _node: &mut Node) {}

    /// Called to refresh type-specific derived data.
    fn update(&self, _node: &mut Node) {}

    /// Called once before the widget is freed.
    fn destroy(&self, _node: &mut Node) {}

    /// Alpha of the widget's rendered pixel at `p`, in the widget's outer
    /// coordinates. `None` when no pixel data is available, in which case
    /// the clickable-alpha policy does not apply.
    fn alpha_at(&self, _node: &Node, _p: Point) -> Option<u8> {
        None
    }
}

/// Hook selector for [`CallbackTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// [`WidgetType::init`].
    Init,
    /// [`WidgetType::show`].
    Show,
    /// [`WidgetType::hide`].
    Hide,
    /// [`WidgetType::resize`].
    Resize,
    /// [`WidgetType::draw`].
    Draw,
    /// [`WidgetType::update`].
    Update,
    /// [`WidgetType::destroy`].
    Destroy,
}

/// A single hook function.
pub type HookFn = Arc<dyn Fn(&mut Node) + Send + Sync>;

/// A widget type assembled from individual hook functions.
#[derive(Clone, Default)]
pub struct CallbackTable {
    /// Installed hooks.
    hooks: HashMap<Hook, HookFn>,
}

impl CallbackTable {
    /// An empty table: every hook is a no-op.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`CallbackTable::set`].
    pub fn with(mut self, hook: Hook, f: impl Fn(&mut Node) + Send + Sync + 'static) -> Self {
        self.set(hook, f);
        self
    }

    /// Install or replace a hook.
    pub fn set(&mut self, hook: Hook, f: impl Fn(&mut Node) + Send + Sync + 'static) {
        self.hooks.insert(hook, Arc::new(f));
    }

    /// True if the hook is installed.
    pub fn has(&self, hook: Hook) -> bool {
        self.hooks.contains_key(&hook)
    }

    /// Invoke a hook if installed.
    fn call(&self, hook: Hook, node: &mut Node) {
        if let Some(f) = self.hooks.get(&hook) {
            f(node);
        }
    }
}

impl fmt::Debug for CallbackTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.hooks.keys()).finish()
    }
}

impl WidgetType for CallbackTable {
    fn init(&self, node: &mut Node) {
        self.call(Hook::Init, node);
    }

    fn show(&self, node: &mut Node) {
        self.call(Hook::Show, node);
    }

    fn hide(&self, node: &mut Node) {
        self.call(Hook::Hide, node);
    }

    fn resize(&self, node: &mut Node) {
        self.call(Hook::Resize, node);
    }

    fn draw(&self, node: &mut Node) {
        self.call(Hook::Draw, node);
    }

    fn update(&self, node: &mut Node) {
        self.call(Hook::Update, node);
    }

    fn destroy(&self, node: &mut Node) {
        self.call(Hook::Destroy, node);
    }
}

/// Behaviour of untyped widgets and of types that were unregistered.
struct Untyped;

impl WidgetType for Untyped {}

/// How a registered type's hooks are stored.
enum Behavior {
    /// Individually installable hooks.
    Table(Arc<CallbackTable>),
    /// A custom implementation.
    Custom(Arc<dyn WidgetType>),
}

impl Behavior {
    /// Shared dispatch handle.
    fn dispatch(&self) -> Arc<dyn WidgetType> {
        match self {
            Self::Table(t) => Arc::clone(t) as Arc<dyn WidgetType>,
            Self::Custom(c) => Arc::clone(c),
        }
    }
}

/// A registered type.
struct Entry {
    /// Type name.
    name: String,
    /// Hooks.
    behavior: Behavior,
}

/// Maps type names to stable ids and hook implementations.
pub struct Registry {
    /// Name lookup.
    ids: HashMap<String, WidgetTypeId>,
    /// Registered types by id.
    entries: HashMap<WidgetTypeId, Entry>,
    /// Next id to issue.
    next_id: u32,
    /// Shared no-op behaviour.
    untyped: Arc<dyn WidgetType>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            entries: HashMap::new(),
            next_id: 1,
            untyped: Arc::new(Untyped),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.ids.iter()).finish()
    }
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new entry under a fresh id.
    fn insert(&mut self, name: &str, behavior: Behavior) -> Result<WidgetTypeId> {
        if self.ids.contains_key(name) {
            return Err(Error::DuplicateType(name.to_string()));
        }
        let id = WidgetTypeId(self.next_id);
        self.next_id += 1;
        self.ids.insert(name.to_string(), id);
        self.entries.insert(
            id,
            Entry {
                name: name.to_string(),
                behavior,
            },
        );
        debug!(name, %id, "registered widget type");
        Ok(id)
    }

    /// Register a type with a custom implementation.
    pub fn register(&mut self, name: &str, kind: impl WidgetType + 'static) -> Result<WidgetTypeId> {
        self.insert(name, Behavior::Custom(Arc::new(kind)))
    }

    /// Register a type backed by an empty [`CallbackTable`].
    pub fn add_type(&mut self, name: &str) -> Result<WidgetTypeId> {
        self.insert(name, Behavior::Table(Arc::new(CallbackTable::new())))
    }

    /// Register a type backed by a prepared [`CallbackTable`].
    pub fn add_table(&mut self, name: &str, table: CallbackTable) -> Result<WidgetTypeId> {
        self.insert(name, Behavior::Table(Arc::new(table)))
    }

    /// Install or replace one hook of a callback-table type. Widgets that
    /// already exist see the new hook on their next dispatch.
    pub fn set_hook(
        &mut self,
        name: &str,
        hook: Hook,
        f: impl Fn(&mut Node) + Send + Sync + 'static,
    ) -> Result<()> {
        let id = self
            .id_of(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;
        match &mut entry.behavior {
            Behavior::Table(table) => {
                Arc::make_mut(table).set(hook, f);
                Ok(())
            }
            Behavior::Custom(_) => Err(Error::NotCallbackTable(name.to_string())),
        }
    }

    /// Remove a type. Existing widgets of the type fall back to no-op hooks.
    pub fn unregister(&mut self, name: &str) -> Result<WidgetTypeId> {
        let id = self
            .ids
            .remove(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;
        self.entries.remove(&id);
        debug!(name, %id, "unregistered widget type");
        Ok(id)
    }

    /// Look up a type id by name.
    pub fn id_of(&self, name: &str) -> Option<WidgetTypeId> {
        self.ids.get(name).copied()
    }

    /// Look up a type name by id.
    pub fn name_of(&self, id: WidgetTypeId) -> Option<&str> {
        self.entries.get(&id).map(|e| e.name.as_str())
    }

    /// True if the name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Hook dispatch for a type. Untyped widgets and unknown ids get no-ops.
    pub(crate) fn resolve(&self, id: Option<WidgetTypeId>) -> Arc<dyn WidgetType> {
        id.and_then(|id| self.entries.get(&id))
            .map(|e| e.behavior.dispatch())
            .unwrap_or_else(|| Arc::clone(&self.untyped))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use slotmap::SlotMap;

    use super::*;
    use crate::id::NodeId;

    fn scratch_node() -> Node {
        let mut map: SlotMap<NodeId, ()> = SlotMap::with_key();
        Node::new(map.insert(()), None, None)
    }

    #[test]
    fn ids_are_sequential_and_stable() -> Result<()> {
        let mut r = Registry::new();
        let a = r.add_type("button")?;
        let b = r.add_type("label")?;
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert_eq!(r.unregister("button")?, a);
        let c = r.add_type("button")?;
        assert_eq!(c.get(), 3);
        assert_eq!(r.name_of(c), Some("button"));
        assert_eq!(r.name_of(a), None);
        assert_eq!(r.len(), 2);
        Ok(())
    }

    #[test]
    fn duplicates_rejected() -> Result<()> {
        let mut r = Registry::new();
        r.add_type("window")?;
        assert_eq!(
            r.add_type("window"),
            Err(Error::DuplicateType("window".into()))
        );
        assert_eq!(
            r.register("window", Untyped).map(|_| ()),
            Err(Error::DuplicateType("window".into()))
        );
        Ok(())
    }

    #[test]
    fn set_hook_dispatches() -> Result<()> {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let mut r = Registry::new();
        let id = r.add_type("menu")?;
        r.set_hook("menu", Hook::Draw, |_| {
            CALLS.fetch_add(1, Ordering::SeqCst);
        })?;
        let mut node = scratch_node();
        let t = r.resolve(Some(id));
        t.draw(&mut node);
        t.show(&mut node);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);

        assert_eq!(
            r.set_hook("missing", Hook::Draw, |_| {}),
            Err(Error::UnknownType("missing".into()))
        );
        r.register("custom", Untyped)?;
        assert_eq!(
            r.set_hook("custom", Hook::Draw, |_| {}),
            Err(Error::NotCallbackTable("custom".into()))
        );
        Ok(())
    }

    #[test]
    fn table_reports_installed_hooks() {
        let mut table = CallbackTable::new().with(Hook::Init, |_| {});
        assert!(table.has(Hook::Init));
        assert!(!table.has(Hook::Draw));
        table.set(Hook::Draw, |_| {});
        assert!(table.has(Hook::Draw));
    }

    #[test]
    fn unknown_ids_are_noops() {
        let r = Registry::new();
        let mut node = scratch_node();
        let t = r.resolve(Some(WidgetTypeId(42)));
        t.init(&mut node);
        assert_eq!(t.alpha_at(&node, Point::zero()), None);
    }
}
