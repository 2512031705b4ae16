//! Bramble: a retained-mode widget tree with deferred layout.
//!
//! Widgets live in an arena owned by [`Core`]. Changing a widget's
//! geometry, visibility or state records a pending update in its
//! container's queue; [`Core::process_updates`] drains those queues once
//! per tick, top-down, resolving sizes and positions, running flow layout
//! and invoking the widget type's hooks. Repaint regions accumulate per
//! widget and are carried up to the root by [`Core::propagate`], where a
//! renderer collects them with [`Core::take_dirty`].
//!
//! # Quick Start
//!
//! - [`Core`] - the arena, registry and update engine
//! - [`Registry`] and [`WidgetType`] - widget types and their hooks
//! - [`Remote`] - a handle for enqueuing requests from other threads
//!
//! # Module Organization
//!
//! - [`geom`] - geometry primitives (Rect, Point, Expanse, Edges)
//! - [`dump`] - tree dumps for debugging

#![warn(missing_docs)]

mod dirty;
mod flow;
mod hit;
mod mutate;
mod resolve;
mod scheduler;
mod world;

pub mod align;
pub mod config;
pub mod dump;
pub mod error;
pub mod id;
pub mod length;
pub mod node;
pub mod registry;
pub mod remote;
pub mod state;
pub mod style;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod update;

pub use align::Align;
pub use config::Config;
pub use dirty::DirtyQueue;
pub use error::{Error, Result};
pub use geom;
pub use id::{NodeId, WidgetTypeId};
pub use length::Length;
pub use node::{GeometrySpec, Limits, Node};
pub use registry::{CallbackTable, Hook, HookFn, Registry, WidgetType};
pub use remote::Remote;
pub use state::{AutoSizeMode, Dock, PositionMode, WidgetState};
pub use style::{
    Background, BackgroundLayout, Border, ClickMode, ClickableAlpha, ImageHandle, Rgb,
};
pub use update::{Payload, PendingUpdate, UpdateKind, UpdateQueue};
pub use world::Core;
