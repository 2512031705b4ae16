//! Interaction states and positioning modes.

use bitflags::bitflags;

bitflags! {
    /// Interaction states. A widget is in exactly one state at a time; the
    /// flags form masks of the states a widget responds to.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WidgetState: u8 {
        /// Idle.
        const NORMAL  = 0b0001;
        /// Pointer hovering.
        const OVERLAY = 0b0010;
        /// Pressed.
        const ACTIVE  = 0b0100;
        /// Disabled.
        const DISABLE = 0b1000;
    }
}

/// How a widget's position is computed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionMode {
    /// Explicit coordinates, or an alignment within the container.
    #[default]
    Absolute,
    /// Placed by the container's flow layout.
    Static,
    /// Placed by the container's flow layout, then shifted by the widget
    /// offset.
    Relative,
}

impl PositionMode {
    /// True for the modes positioned by flow layout.
    pub fn is_flow(self) -> bool {
        matches!(self, Self::Static | Self::Relative)
    }
}

/// Anchoring of a widget to an edge of its container.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dock {
    /// Not docked.
    #[default]
    None,
    /// Top edge, full width.
    Top,
    /// Bottom edge, full width.
    Bottom,
    /// Left edge, full height.
    Left,
    /// Right edge, full height.
    Right,
    /// Centered, full width and height.
    Fill,
}

impl Dock {
    /// True if the dock mode fixes the width to the container.
    pub fn stretches_width(self) -> bool {
        matches!(self, Self::Top | Self::Bottom | Self::Fill)
    }

    /// True if the dock mode fixes the height to the container.
    pub fn stretches_height(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Fill)
    }
}

/// How an auto-sized container follows the extent of its children.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AutoSizeMode {
    /// Track the children's bounding box exactly.
    #[default]
    GrowAndShrink,
    /// Only ever grow.
    GrowOnly,
}
