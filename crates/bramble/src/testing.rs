//! Test support: recording widget types and a ready-made core.

use std::sync::Arc;

use geom::Point;
use parking_lot::Mutex;
use tracing::Level;

use crate::{
    Core,
    config::Config,
    error::Result,
    id::NodeId,
    node::Node,
    registry::{Hook, WidgetType},
};

/// Type name of the [`Recorder`] type registered by [`test_core`].
pub const RECORDER: &str = "recorder";

/// Type name of the [`AlphaMask`] type registered by [`test_core`].
pub const ALPHA_MASK: &str = "alpha_mask";

/// One hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookCall {
    /// The hook that ran.
    pub hook: Hook,
    /// The widget it ran for.
    pub node: NodeId,
}

/// A shared log of hook invocations.
#[derive(Debug, Clone, Default)]
pub struct HookLog {
    /// Calls in invocation order.
    calls: Arc<Mutex<Vec<HookCall>>>,
}

impl HookLog {
    /// Append a call.
    fn push(&self, hook: Hook, node: &Node) {
        self.calls.lock().push(HookCall {
            hook,
            node: node.id(),
        });
    }

    /// All calls so far.
    pub fn calls(&self) -> Vec<HookCall> {
        self.calls.lock().clone()
    }

    /// Number of times `hook` ran for `node`.
    pub fn count(&self, hook: Hook, node: NodeId) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.hook == hook && c.node == node)
            .count()
    }

    /// The hooks that ran for `node`, in order.
    pub fn hooks_for(&self, node: NodeId) -> Vec<Hook> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.node == node)
            .map(|c| c.hook)
            .collect()
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}

/// A widget type that records every hook into a [`HookLog`].
#[derive(Debug, Clone)]
pub struct Recorder {
    /// Destination log.
    log: HookLog,
}

impl Recorder {
    /// A recorder writing to `log`.
    pub fn new(log: HookLog) -> Self {
        Self { log }
    }
}

impl WidgetType for Recorder {
    fn init(&self, node: &mut Node) {
        self.log.push(Hook::Init, node);
    }

    fn show(&self, node: &mut Node) {
        self.log.push(Hook::Show, node);
    }

    fn hide(&self, node: &mut Node) {
        self.log.push(Hook::Hide, node);
    }

    fn resize(&self, node: &mut Node) {
        self.log.push(Hook::Resize, node);
    }

    fn draw(&self, node: &mut Node) {
        self.log.push(Hook::Draw, node);
    }

    fn update(&self, node: &mut Node) {
        self.log.push(Hook::Update, node);
    }

    fn destroy(&self, node: &mut Node) {
        self.log.push(Hook::Destroy, node);
    }
}

/// Uniform pixel alpha for an [`AlphaMask`] widget, stored as widget data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelAlpha(pub u8);

/// A widget type whose every pixel has the alpha in its [`PixelAlpha`]
/// data.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaMask;

impl WidgetType for AlphaMask {
    fn alpha_at(&self, node: &Node, _p: Point) -> Option<u8> {
        node.data::<PixelAlpha>().map(|a| a.0)
    }
}

/// An active core with the given screen size and the [`Recorder`] and
/// [`AlphaMask`] types registered.
pub fn test_core(w: i32, h: i32) -> Result<(Core, HookLog)> {
    let mut core = Core::new(Config::with_screen(w, h));
    let log = HookLog::default();
    core.registry_mut()
        .register(RECORDER, Recorder::new(log.clone()))?;
    core.registry_mut().register(ALPHA_MASK, AlphaMask)?;
    core.activate();
    Ok((core, log))
}

/// Route tracing output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::TRACE)
        .try_init()
        .ok();
}
