//! Runtime configuration.

use geom::Expanse;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Runtime configuration for a [`Core`](crate::Core).
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Width of the display surface, used as the root container extent.
    pub screen_width: i32,
    /// Height of the display surface, used as the root container extent.
    pub screen_height: i32,
    /// Upper bound on the stacking index of non-modal widgets.
    pub max_z_index: i32,
    /// Lower bound on the stacking index of modal widgets.
    pub modal_z_floor: i32,
    /// Maximum number of state machine steps spent placing a single widget
    /// during flow layout.
    pub flow_pass_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            max_z_index: 9999,
            modal_z_floor: 10000,
            flow_pass_limit: 64,
        }
    }
}

impl Config {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// A default configuration with the given screen extent.
    pub fn with_screen(w: i32, h: i32) -> Self {
        Self {
            screen_width: w,
            screen_height: h,
            ..Self::default()
        }
    }

    /// Check the values for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.screen_width <= 0 || self.screen_height <= 0 {
            return Err(Error::Config(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.modal_z_floor <= self.max_z_index {
            return Err(Error::Config(
                "modal_z_floor must be above max_z_index".into(),
            ));
        }
        if self.flow_pass_limit == 0 {
            return Err(Error::Config("flow_pass_limit must be non-zero".into()));
        }
        Ok(())
    }

    /// The display surface extent.
    pub fn screen(&self) -> Expanse {
        Expanse::new(self.screen_width, self.screen_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() -> Result<()> {
        let c = Config::from_json(r#"{"screen_width": 1024}"#)?;
        assert_eq!(c.screen(), Expanse::new(1024, 600));
        assert_eq!(c.max_z_index, 9999);
        assert_eq!(c.flow_pass_limit, 64);
        Ok(())
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_json(r#"{"screen_height": 0}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"max_z_index": 20000}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"screen_depth": 3}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(Config::from_json("{"), Err(Error::Config(_))));
    }
}
