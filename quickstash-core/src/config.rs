use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings read at the start of every stash pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StashConfig {
    /// Master switch. A disabled engine does nothing.
    pub enabled: bool,

    /// Containers further away than this are ignored
    pub max_distance: f32,

    /// Columns `0..=excluded_slots` of the first inventory row are never stashed
    pub excluded_slots: usize,

    /// Try the container the actor has open before falling back to empty ones
    pub prioritize_in_use: bool,

    /// Emit a debug event per placement
    pub diagnostics: bool,

    pub highlight: HighlightConfig,
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_distance: 100.0,
            excluded_slots: 8,
            prioritize_in_use: true,
            diagnostics: false,
            highlight: HighlightConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enabled: bool,
    pub duration_ms: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 2000,
        }
    }
}

impl HighlightConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl StashConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(ConfigError::Validation {
                field: "max_distance",
                message: format!("must be a positive number, got {}", self.max_distance),
            });
        }

        if self.highlight.enabled && self.highlight.duration_ms == 0 {
            return Err(ConfigError::Validation {
                field: "highlight.duration_ms",
                message: "must be positive when highlighting is enabled".to_string(),
            });
        }

        Ok(())
    }
}
