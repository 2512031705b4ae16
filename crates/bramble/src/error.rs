//! Error type shared across the crate.

use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::id::NodeId;

/// Result type for bramble operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("unknown widget type: {0}")]
    /// A widget type name that has not been registered.
    UnknownType(String),
    #[error("widget type already registered: {0}")]
    /// A widget type name was registered twice.
    DuplicateType(String),
    #[error("widget type {0} does not use a callback table")]
    /// Per-hook installation on a type registered with a custom implementation.
    NotCallbackTable(String),
    #[error("runtime is not active")]
    /// Widgets cannot be constructed before the runtime is activated.
    NotActive,
    #[error("node not found: {0:?}")]
    /// The node id is stale or was never issued.
    NodeNotFound(NodeId),
    #[error("invalid operation on root: {0}")]
    /// The operation makes no sense on the synthetic root container.
    RootOperation(String),
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    /// Re-parenting would make a node its own ancestor.
    WouldCreateCycle {
        /// Requested container.
        parent: NodeId,
        /// Node being attached.
        child: NodeId,
    },
    #[error("parse error: {0}")]
    /// Malformed length string.
    Parse(String),
    #[error("config: {0}")]
    /// Invalid configuration.
    Config(String),
    #[error("io: {0}")]
    /// Output failure while rendering debug text.
    Io(String),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
