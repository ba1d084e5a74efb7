use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::geometry::ShapeParameters;
use crate::tessellation::GridSpec;

/// Shape and grid of a spiral surface, as read from a user-facing control
/// surface.
///
/// Serializes to JSON so the same document can drive the demo program, a UI
/// form or a saved preset. Missing fields fall back to their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Shape parameters `a`, `b`, `n`.
    pub shape: ShapeParameters,
    /// Sampling grid.
    pub grid: GridSpec,
}

impl SurfaceConfig {
    /// Creates a new surface config.
    #[must_use]
    pub fn new(shape: ShapeParameters, grid: GridSpec) -> Self {
        Self { shape, grid }
    }

    /// Parses a config from a JSON document.
    ///
    /// The grid is not validated here; [`crate::tessellation::generate_mesh`]
    /// does that before generating.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the document is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(ConfigError::Json)
            .map_err(Into::into)
    }

    /// Serializes the config to a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(ConfigError::Json)
            .map_err(Into::into)
    }
}
