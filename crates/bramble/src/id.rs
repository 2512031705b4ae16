//! Widget and widget type identifiers.

use std::fmt;

use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a widget stored in the Core arena.
    pub struct NodeId;
}

/// Stable identifier of a registered widget type. Identifiers are issued
/// sequentially from 1 and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetTypeId(pub(crate) u32);

impl WidgetTypeId {
    /// Return the raw numeric identifier.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WidgetTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
