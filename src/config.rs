use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::document::MapConfig;
use crate::error::EditorResult;

/// Zoom bounds, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub initial: u32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 25,
            max: 400,
            step: 25,
            initial: 100,
        }
    }
}

impl ZoomConfig {
    pub fn clamp(&self, zoom: u32) -> u32 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        zoom.clamp(lo.max(1), hi.max(1))
    }
}

/// Editor settings. Persisted between sessions.
///
/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    /// Settings used for "New map"
    pub new_map: MapConfig,
    pub zoom: ZoomConfig,
    /// Draw cell outlines on the canvas
    pub show_grid: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            new_map: MapConfig::default(),
            zoom: ZoomConfig::default(),
            show_grid: true,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.new_map.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::info!("Loading editor config from {}", path.as_ref().display());
        Self::from_json(&json)
    }
}
