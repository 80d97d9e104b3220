//! Editor configuration.
//!
//! Settings are read from JSON. Every field has a default, so a partial file
//! (or an empty object) is a valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Settings for an [`Editor`](crate::editor::Editor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo steps kept. `None` keeps every step.
    pub history_limit: Option<usize>,
    /// Name given to features completed with the drawing tool.
    pub new_feature_name: String,
    pub simplify: SimplifyConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(100),
            new_feature_name: "New Polygon".to_string(),
            simplify: SimplifyConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            warn!("Failed to read editor config {:?}: {}", path, e);
            e
        })?;
        let config = Self::from_json_str(&contents).map_err(|e| {
            warn!("Failed to parse editor config {:?}: {}", path, e);
            e
        })?;
        debug!("Loaded editor config from {:?}", path);
        Ok(config)
    }
}

/// Mapping from the simplification slider to an RDP tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// Tolerance at slider position 0.
    pub epsilon_min: f64,
    /// Tolerance at slider position 100.
    pub epsilon_max: f64,
    /// Slider position a preview starts from.
    pub default_slider: f64,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            epsilon_min: 1e-5,
            epsilon_max: 3e-3,
            default_slider: 30.0,
        }
    }
}

impl SimplifyConfig {
    /// Maps a 0..=100 slider position to a tolerance on an exponential scale.
    /// Each step scales the tolerance by the same factor, which gives the low
    /// end of the slider fine control over small tolerances.
    ///
    /// ```
    /// use regionedit::config::SimplifyConfig;
    ///
    /// let cfg = SimplifyConfig::default();
    /// assert_eq!(cfg.epsilon_for_slider(0.0), cfg.epsilon_min);
    /// assert!((cfg.epsilon_for_slider(100.0) - cfg.epsilon_max).abs() < 1e-15);
    /// ```
    pub fn epsilon_for_slider(&self, slider: f64) -> f64 {
        let t = slider.clamp(0.0, 100.0) / 100.0;
        self.epsilon_min * (self.epsilon_max / self.epsilon_min).powf(t)
    }

    /// Tolerance at the default slider position.
    #[inline]
    pub fn default_epsilon(&self) -> f64 {
        self.epsilon_for_slider(self.default_slider)
    }
}
