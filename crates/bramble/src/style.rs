//! Appearance properties. The core stores these and requests repaints when
//! they change; drawing them is the compositor's job.

use geom::Edges;

/// An opaque RGB colour.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Construct a colour.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
}

/// Handle to an image owned by the graphics layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// How a background image is laid out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundLayout {
    /// Drawn once at the origin.
    #[default]
    None,
    /// Repeated to fill.
    Tile,
    /// Scaled to fill, ignoring aspect ratio.
    Stretch,
    /// Drawn once, centered.
    Center,
    /// Scaled to fit, preserving aspect ratio.
    Zoom,
}

/// Widget background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Background {
    /// Fill colour.
    pub color: Rgb,
    /// Optional image drawn over the fill.
    pub image: Option<ImageHandle>,
    /// Whether the fill colour is skipped.
    pub transparent: bool,
    /// Image layout.
    pub layout: BackgroundLayout,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            color: Rgb::WHITE,
            image: None,
            transparent: true,
            layout: BackgroundLayout::None,
        }
    }
}

/// Widget border.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Border {
    /// Line width per edge.
    pub width: Edges,
    /// Line colour.
    pub color: Rgb,
    /// Corner radius.
    pub radius: u32,
}

impl Border {
    /// A uniform border.
    pub fn solid(width: i32, color: Rgb) -> Self {
        Self {
            width: Edges::all(width),
            color,
            radius: 0,
        }
    }
}

/// Which side of the alpha threshold is transparent to hit testing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickMode {
    /// Pixels with alpha below the threshold are ignored.
    #[default]
    IgnoreBelow,
    /// Pixels with alpha at or above the threshold are ignored.
    IgnoreAtOrAbove,
}

/// Clickable-alpha policy: lets hit testing pass through a widget where its
/// backing pixels are (or are not) transparent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClickableAlpha {
    /// Alpha threshold.
    pub threshold: u8,
    /// Which side of the threshold passes through.
    pub mode: ClickMode,
}

impl ClickableAlpha {
    /// Construct a policy.
    pub fn new(threshold: u8, mode: ClickMode) -> Self {
        Self { threshold, mode }
    }

    /// True if a pixel with this alpha should not count as a hit.
    pub fn ignores(&self, alpha: u8) -> bool {
        match self.mode {
            ClickMode::IgnoreBelow => alpha < self.threshold,
            ClickMode::IgnoreAtOrAbove => alpha >= self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clickable_alpha() {
        let below = ClickableAlpha::new(128, ClickMode::IgnoreBelow);
        assert!(below.ignores(50));
        assert!(!below.ignores(128));
        let above = ClickableAlpha::new(128, ClickMode::IgnoreAtOrAbove);
        assert!(!above.ignores(50));
        assert!(above.ignores(128));
        // The default policy never ignores anything.
        assert!(!ClickableAlpha::default().ignores(0));
    }
}
