use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default delay between a touch and its synthesized release.
pub const DEFAULT_TOUCH_RELEASE_MS: u64 = 500;

/// Engine configuration.
///
/// Options can be built with the fluent setters or read from JSON, where
/// every field is optional:
///
/// ```json
/// { "touch_release_ms": 250, "touch_surface": "panel" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Milliseconds between a touch and the release synthesized for it.
    pub touch_release_ms: u64,
    /// Only accept touches from this surface. Touches from every surface are
    /// accepted when unset.
    pub touch_surface: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            touch_release_ms: DEFAULT_TOUCH_RELEASE_MS,
            touch_surface: None,
        }
    }
}

impl Options {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the touch release delay.
    pub fn with_touch_release(mut self, delay: Duration) -> Self {
        self.touch_release_ms = delay.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Accept touches from only one surface.
    pub fn with_touch_surface(mut self, surface: impl Into<String>) -> Self {
        self.touch_surface = Some(surface.into());
        self
    }

    /// The touch release delay.
    pub fn touch_release(&self) -> Duration {
        Duration::from_millis(self.touch_release_ms)
    }

    /// Parse options from a JSON document.
    pub fn from_json(src: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(src)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&src)
    }

    /// Check option values for consistency.
    fn validate(&self) -> Result<()> {
        if self.touch_surface.as_deref() == Some("") {
            return Err(Error::Invalid("touch_surface must not be empty".into()));
        }
        Ok(())
    }
}
