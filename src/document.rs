use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::geometry::{canvas_size, Topology};
use crate::layer::{Layer, LayerId};

/// Map-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub topology: Topology,
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
}

impl MapConfig {
    pub fn new(topology: Topology, tile_size: u32, width: usize, height: usize) -> EditorResult<Self> {
        let config = Self {
            topology,
            tile_size,
            width,
            height,
        };
        config.validate()?;
        Ok(config)
    }

    /// Tile size, width and height must all be positive.
    pub fn validate(&self) -> EditorResult<()> {
        if self.tile_size == 0 {
            return Err(EditorError::InvalidDimensions("tile size must be positive".into()));
        }
        check_size(self.width, self.height)
    }

    /// Pixel size of the drawn map.
    pub fn canvas_size(&self) -> egui::Vec2 {
        canvas_size(self.width, self.height, self.tile_size, self.topology)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            topology: Topology::Grid,
            tile_size: 32,
            width: 20,
            height: 15,
        }
    }
}

/// Cells are addressed with `i32` coordinates, so neither side may exceed
/// `i32::MAX`, and the cell count must fit in memory indexing.
fn check_size(width: usize, height: usize) -> EditorResult<()> {
    if width == 0 || height == 0 {
        return Err(EditorError::InvalidDimensions(format!(
            "map must be at least 1×1 cells, got {width}×{height}"
        )));
    }
    let max_side = i32::MAX as usize;
    if width > max_side || height > max_side || width.checked_mul(height).is_none() {
        return Err(EditorError::InvalidDimensions(format!(
            "map of {width}×{height} cells is too large"
        )));
    }
    Ok(())
}

/// Name given to the layer at 1-based position `n`.
pub fn layer_name(n: usize) -> String {
    format!("Layer {n}")
}

/// The map being edited: configuration plus an ordered, never-empty list of
/// layers, bottom first.
///
/// Every layer's grid matches `config.width × config.height`.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    config: MapConfig,
    layers: Vec<Layer>,
}

impl Default for MapDocument {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl MapDocument {
    /// A fresh map with a single empty base layer.
    pub fn new(config: MapConfig) -> Self {
        let base = Layer::new(&layer_name(1), config.width, config.height);
        Self {
            config,
            layers: vec![base],
        }
    }

    /// Assembles a document from already-built layers, checking every
    /// invariant first.
    pub fn from_parts(config: MapConfig, layers: Vec<Layer>) -> EditorResult<Self> {
        config.validate()?;
        if layers.is_empty() {
            return Err(EditorError::NoLayers);
        }
        for layer in &layers {
            if layer.width() != config.width || layer.height() != config.height {
                return Err(EditorError::LayerSizeMismatch {
                    name: layer.name.clone(),
                    expected: format!("{}×{}", config.width, config.height),
                    actual: format!("{}×{}", layer.width(), layer.height()),
                });
            }
        }
        Ok(Self { config, layers })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn check_index(&self, index: usize) -> EditorResult<()> {
        if index >= self.layers.len() {
            return Err(EditorError::IndexOutOfRange {
                index,
                len: self.layers.len(),
            });
        }
        Ok(())
    }

    pub fn layer(&self, index: usize) -> EditorResult<&Layer> {
        self.check_index(index)?;
        Ok(&self.layers[index])
    }

    pub fn layer_mut(&mut self, index: usize) -> EditorResult<&mut Layer> {
        self.check_index(index)?;
        Ok(&mut self.layers[index])
    }

    /// Position of the layer with `id`
    pub fn find_layer(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// Appends an empty layer named after its position and returns its index.
    pub fn add_layer(&mut self) -> usize {
        let name = layer_name(self.layers.len() + 1);
        self.layers
            .push(Layer::new(&name, self.config.width, self.config.height));
        log::info!("Added layer '{}'", name);
        self.layers.len() - 1
    }

    /// Removes the layer at `index`.
    ///
    /// Returns `Ok(false)` without touching anything when it is the only layer.
    pub fn remove_layer(&mut self, index: usize) -> EditorResult<bool> {
        self.check_index(index)?;
        if self.layers.len() == 1 {
            log::debug!("Refusing to remove the last layer");
            return Ok(false);
        }
        let removed = self.layers.remove(index);
        log::info!("Removed layer '{}' ({})", removed.name, removed.id);
        Ok(true)
    }

    pub fn rename_layer(&mut self, index: usize, name: &str) -> EditorResult<()> {
        self.layer_mut(index)?.set_name(name.to_string());
        Ok(())
    }

    pub fn set_visibility(&mut self, index: usize, visible: bool) -> EditorResult<()> {
        self.layer_mut(index)?.visible = visible;
        Ok(())
    }

    /// Flips visibility and returns the new value.
    pub fn toggle_visibility(&mut self, index: usize) -> EditorResult<bool> {
        let layer = self.layer_mut(index)?;
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    /// Moves the layer at `from` so that it ends up at `to`.
    pub fn move_layer(&mut self, from: usize, to: usize) -> EditorResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        Ok(())
    }

    /// Resizes the map and every layer together.
    ///
    /// Cells still inside the new bounds keep their tiles; new cells are
    /// empty. Invalid sizes are rejected before any layer changes.
    pub fn resize(&mut self, width: usize, height: usize) -> EditorResult<()> {
        check_size(width, height)?;
        if width == self.config.width && height == self.config.height {
            return Ok(());
        }
        let resized: Vec<_> = self
            .layers
            .iter()
            .map(|layer| layer.tiles().resized(width, height))
            .collect();
        for (layer, tiles) in self.layers.iter_mut().zip(resized) {
            layer.set_tiles(tiles);
        }
        log::debug!(
            "Resized map from {}×{} to {width}×{height}",
            self.config.width,
            self.config.height
        );
        self.config.width = width;
        self.config.height = height;
        Ok(())
    }

    /// Changes topology and tile size. Cell contents are unaffected.
    pub fn set_geometry(&mut self, topology: Topology, tile_size: u32) -> EditorResult<()> {
        if tile_size == 0 {
            return Err(EditorError::InvalidDimensions("tile size must be positive".into()));
        }
        self.config.topology = topology;
        self.config.tile_size = tile_size;
        Ok(())
    }
}
