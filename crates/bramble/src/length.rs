//! Lengths in pixels or as a fraction of the container.

use std::{fmt, str::FromStr};

use crate::error::{Error, Result};

/// A declarative length: either absolute pixels or a fraction of the
/// container's content extent along the same axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute pixels.
    Px(i32),
    /// Fraction of the container extent, where 1.0 is the full extent.
    Scale(f64),
}

impl Default for Length {
    fn default() -> Self {
        Self::Px(0)
    }
}

impl Length {
    /// A percentage of the container extent.
    pub fn percent(p: f64) -> Self {
        Self::Scale(p / 100.0)
    }

    /// True if this length depends on the container extent.
    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Scale(_))
    }

    /// Resolve against a container extent. Fractional pixels are truncated
    /// towards zero.
    pub fn resolve(&self, container: i32) -> i32 {
        match *self {
            Self::Px(v) => v,
            Self::Scale(s) => (s * f64::from(container)) as i32,
        }
    }
}

impl From<i32> for Length {
    fn from(v: i32) -> Self {
        Self::Px(v)
    }
}

impl FromStr for Length {
    type Err = Error;

    /// Parse `"50%"`, `"100px"` or a bare pixel count such as `"100"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(p) = s.strip_suffix('%') {
            let v: f64 = p
                .trim()
                .parse()
                .map_err(|_| Error::Parse(format!("invalid percentage: {s:?}")))?;
            if !v.is_finite() {
                return Err(Error::Parse(format!("invalid percentage: {s:?}")));
            }
            return Ok(Self::percent(v));
        }
        let px = s.strip_suffix("px").unwrap_or(s).trim();
        px.parse()
            .map(Self::Px)
            .map_err(|_| Error::Parse(format!("invalid length: {s:?}")))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Scale(s) => write!(f, "{}%", s * 100.0),
        }
    }
}
