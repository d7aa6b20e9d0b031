//! The stored map shape shared with the persistence API and exporters:
//!
//! ```json
//! { "topology": "grid", "tileSize": 32, "width": 2, "height": 1,
//!   "layers": [{ "id": "…", "name": "Layer 1", "visible": true,
//!                "tiles": [["0,1,2", null]] }] }
//! ```
//!
//! Loading checks the whole payload before building anything, so a bad file
//! is rejected as a unit and never leaves a half-loaded map behind.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

use crate::document::{MapConfig, MapDocument};
use crate::error::{EditorError, EditorResult};
use crate::geometry::Topology;
use crate::layer::{Layer, LayerId, TileGrid};
use crate::tile::TileRef;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLayer {
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// `height` rows of `width` encoded tiles or `null`
    pub tiles: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMap {
    /// Kept as a string so an unknown value reports as a topology error
    pub topology: String,
    pub tile_size: u32,
    pub width: usize,
    pub height: usize,
    pub layers: Vec<StoredLayer>,
}

impl From<&Layer> for StoredLayer {
    fn from(layer: &Layer) -> Self {
        Self {
            id: layer.id.to_string(),
            name: layer.name.clone(),
            visible: layer.visible,
            tiles: layer
                .tiles()
                .rows()
                .into_iter()
                .map(|row| row.into_iter().map(|c| c.map(|t| t.encode())).collect())
                .collect(),
        }
    }
}

impl From<&MapDocument> for StoredMap {
    fn from(doc: &MapDocument) -> Self {
        let config = doc.config();
        Self {
            topology: config.topology.to_string(),
            tile_size: config.tile_size,
            width: config.width,
            height: config.height,
            layers: doc.layers().iter().map(StoredLayer::from).collect(),
        }
    }
}

impl StoredLayer {
    fn into_layer(self, width: usize, height: usize) -> EditorResult<Layer> {
        let size_mismatch = |actual: String| EditorError::LayerSizeMismatch {
            name: self.name.clone(),
            expected: format!("{height} rows of {width}"),
            actual,
        };
        if self.tiles.len() != height {
            return Err(size_mismatch(format!("{} rows", self.tiles.len())));
        }
        if let Some((y, row)) = self.tiles.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(size_mismatch(format!("{} cells in row {y}", row.len())));
        }

        let id = Uuid::parse_str(&self.id)
            .map(LayerId)
            .map_err(|_| EditorError::InvalidLayerId(self.id.clone()))?;

        let rows = self
            .tiles
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_deref().map(TileRef::decode).transpose())
                    .collect::<EditorResult<Vec<_>>>()
            })
            .collect::<EditorResult<Vec<_>>>()?;

        let grid = TileGrid::from_rows(width, rows).ok_or_else(|| size_mismatch("ragged rows".into()))?;
        Ok(Layer::with_tiles(id, &self.name, self.visible, grid))
    }
}

impl TryFrom<StoredMap> for MapDocument {
    type Error = EditorError;

    fn try_from(stored: StoredMap) -> EditorResult<Self> {
        let topology: Topology = stored.topology.parse()?;
        let config = MapConfig::new(topology, stored.tile_size, stored.width, stored.height)?;
        if stored.layers.is_empty() {
            return Err(EditorError::NoLayers);
        }

        let mut seen = HashSet::new();
        let mut layers = Vec::with_capacity(stored.layers.len());
        for stored_layer in stored.layers {
            let layer = stored_layer.into_layer(config.width, config.height)?;
            if !seen.insert(layer.id) {
                return Err(EditorError::InvalidLayerId(format!("duplicate id {}", layer.id)));
            }
            layers.push(layer);
        }
        MapDocument::from_parts(config, layers)
    }
}

impl MapDocument {
    pub fn to_stored(&self) -> StoredMap {
        StoredMap::from(self)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string(&self.to_stored())?)
    }

    pub fn to_json_pretty(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_stored())?)
    }

    /// Parses and validates a stored map. Any problem rejects the whole map.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let stored: StoredMap = serde_json::from_str(json)?;
        Self::try_from(stored).inspect_err(|e| log::warn!("Rejected map: {e}"))
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        log::info!("Saved map to {}", path.display());
        Ok(())
    }

    pub fn load_file(path: impl AsRef<Path>) -> EditorResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::info!("Loading map from {}", path.display());
        Self::from_json(&json)
    }
}
