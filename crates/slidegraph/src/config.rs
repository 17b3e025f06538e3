//! Window and ingestion settings.

use crate::edge::Timestamp;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default trailing window, in seconds.
pub const DEFAULT_WINDOW_SIZE: Timestamp = 60;

/// Settings shared by the graph and the stream driver.
///
/// Every field has a default, so a JSON config file only needs the values it
/// changes:
///
/// ```json
/// { "window_size": 120, "lowercase_labels": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width of the trailing window. Links last seen at or before
    /// `current_time - window_size` are evicted.
    pub window_size: Timestamp,
    /// Remove nodes that eviction leaves without links. When `false` they
    /// stay and count towards the average-degree denominator.
    pub prune_isolated: bool,
    /// Fold labels to lower case before building the graph.
    pub lowercase_labels: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            prune_isolated: true,
            lowercase_labels: false,
        }
    }
}

impl WindowConfig {
    /// Config with the given window and defaults elsewhere.
    pub fn with_window(window_size: Timestamp) -> Self {
        Self {
            window_size,
            ..Self::default()
        }
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the graph cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.window_size <= 0 {
            return Err(Error::Config(format!(
                "window_size must be positive, got {}",
                self.window_size
            )));
        }
        Ok(())
    }
}
