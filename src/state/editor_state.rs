//! The editing session.
//!
//! `EditorState` is owned by whoever drives the editor (the app, a test, a
//! server-side worker) and passed by reference; nothing here is global.
//! Every mutation validates its arguments before touching the document.

use egui::Pos2;

use crate::config::{EditorConfig, ZoomConfig};
use crate::document::MapDocument;
use crate::error::EditorResult;
use crate::geometry::{pixel_to_cell, CellPos, Topology};
use crate::layer::Layer;
use crate::tile::TileRef;
use crate::tileset::TileSelection;
use crate::tool::{PaintSource, PaintTool, ToolType};

#[derive(Debug, Clone)]
pub struct EditorState {
    document: MapDocument,
    /// Always a valid index into `document.layers()`
    active_layer: usize,
    tool: ToolType,
    selected_tile: Option<TileRef>,
    selection: Option<TileSelection>,
    /// Cell under the pointer, `None` when off-canvas
    cursor: Option<CellPos>,
    /// Zoom in percent
    zoom: u32,
    zoom_config: ZoomConfig,
    /// Set between pointer down and pointer up
    pub(crate) dragging: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditorState {
    /// A session with a fresh map built from `config.new_map`.
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_document(MapDocument::new(config.new_map), config)
    }

    pub fn with_document(document: MapDocument, config: &EditorConfig) -> Self {
        Self {
            document,
            active_layer: 0,
            tool: ToolType::default(),
            selected_tile: None,
            selection: None,
            cursor: None,
            zoom: config.zoom.clamp(config.zoom.initial),
            zoom_config: config.zoom,
            dragging: false,
        }
    }

    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    /// A copy of the current map. Tile arrays are shared, and later paints
    /// never show up in the copy.
    pub fn snapshot(&self) -> MapDocument {
        self.document.clone()
    }

    /// Replaces the whole map, e.g. after loading from storage.
    pub fn load_document(&mut self, document: MapDocument) {
        log::info!(
            "Loaded map {}×{} ({}) with {} layers",
            document.width(),
            document.height(),
            document.config().topology,
            document.layer_count()
        );
        self.document = document;
        self.active_layer = 0;
        self.cursor = None;
        self.dragging = false;
    }

    // ---------------------------------------------------------------------
    // Layers

    pub fn active_layer_index(&self) -> usize {
        self.active_layer
    }

    pub fn active_layer(&self) -> &Layer {
        &self.document.layers()[self.active_layer]
    }

    pub fn set_active_layer(&mut self, index: usize) -> EditorResult<()> {
        self.document.layer(index)?;
        self.active_layer = index;
        Ok(())
    }

    /// Adds an empty layer on top and makes it active.
    pub fn add_layer(&mut self) -> usize {
        let index = self.document.add_layer();
        self.active_layer = index;
        index
    }

    /// Removes a layer; a no-op returning `Ok(false)` when only one is left.
    pub fn remove_layer(&mut self, index: usize) -> EditorResult<bool> {
        let removed = self.document.remove_layer(index)?;
        if removed {
            self.active_layer = self.active_layer.min(self.document.layer_count() - 1);
        }
        Ok(removed)
    }

    pub fn rename_layer(&mut self, index: usize, name: &str) -> EditorResult<()> {
        self.document.rename_layer(index, name)
    }

    pub fn set_layer_visibility(&mut self, index: usize, visible: bool) -> EditorResult<()> {
        self.document.set_visibility(index, visible)
    }

    pub fn toggle_layer_visibility(&mut self, index: usize) -> EditorResult<bool> {
        self.document.toggle_visibility(index)
    }

    /// Reorders layers; the active layer stays the same layer.
    pub fn move_layer(&mut self, from: usize, to: usize) -> EditorResult<()> {
        let active_id = self.active_layer().id;
        self.document.move_layer(from, to)?;
        self.active_layer = self.document.find_layer(active_id).unwrap_or(0);
        Ok(())
    }

    pub fn resize_map(&mut self, width: usize, height: usize) -> EditorResult<()> {
        self.document.resize(width, height)?;
        if let Some(cursor) = self.cursor {
            if !cursor.in_bounds(width, height) {
                self.cursor = None;
            }
        }
        Ok(())
    }

    /// Switches topology and tile size; painted cells keep their addresses.
    pub fn set_geometry(&mut self, topology: Topology, tile_size: u32) -> EditorResult<()> {
        self.document.set_geometry(topology, tile_size)?;
        log::info!("Map geometry set to {} with {}px tiles", topology, tile_size);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Tools and selection

    pub fn tool(&self) -> ToolType {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolType) {
        if self.tool != tool {
            log::debug!("Tool changed: {} -> {}", self.tool.name(), tool.name());
            self.tool = tool;
        }
    }

    pub fn selected_tile(&self) -> Option<TileRef> {
        self.selected_tile
    }

    pub fn selection(&self) -> Option<&TileSelection> {
        self.selection.as_ref()
    }

    /// Picks a single tile, dropping any block selection.
    pub fn select_tile(&mut self, tile: Option<TileRef>) {
        self.selected_tile = tile;
        self.selection = None;
    }

    /// Picks a block of tiles; its top-left tile becomes the selected tile.
    pub fn select_block(&mut self, block: TileSelection) {
        self.selected_tile = block.first();
        self.selection = Some(block);
    }

    pub fn clear_selection(&mut self) {
        self.selected_tile = None;
        self.selection = None;
    }

    // ---------------------------------------------------------------------
    // Painting

    /// Applies the current tool to `cell` on the active layer.
    ///
    /// Returns `true` if the layer changed. The new tile array replaces the
    /// old one; anyone still holding the old array keeps seeing it unchanged.
    pub fn paint(&mut self, cell: CellPos) -> bool {
        let source = PaintSource {
            tile: self.selected_tile,
            block: self.selection.as_ref(),
        };
        let layer = &self.document.layers()[self.active_layer];
        let Some(tiles) = self.tool.apply(layer.tiles(), cell, &source) else {
            return false;
        };

        log::debug!("{} at {} on '{}'", self.tool.name(), cell, layer.name);
        // the index was validated when it became active
        if let Ok(layer) = self.document.layer_mut(self.active_layer) {
            layer.set_tiles(tiles);
        }
        true
    }

    /// Paints at a canvas pixel (already relative to the canvas origin and
    /// still scaled by the zoom).
    pub fn paint_at(&mut self, pos: Pos2) -> bool {
        let cell = self.screen_to_map(pos);
        self.paint(cell)
    }

    // ---------------------------------------------------------------------
    // Cursor and zoom

    pub fn cursor(&self) -> Option<CellPos> {
        self.cursor
    }

    /// Tracks the cell under the pointer; off-map cells clear the cursor.
    pub fn set_cursor(&mut self, cell: Option<CellPos>) {
        self.cursor = cell.filter(|c| c.in_bounds(self.document.width(), self.document.height()));
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn zoom_factor(&self) -> f32 {
        self.zoom as f32 / 100.0
    }

    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = self.zoom_config.clamp(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom.saturating_add(self.zoom_config.step));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom.saturating_sub(self.zoom_config.step));
    }

    /// The map cell under a zoomed canvas pixel.
    pub fn screen_to_map(&self, pos: Pos2) -> CellPos {
        let config = self.document.config();
        let scale = self.zoom_factor();
        let unscaled = Pos2::new(pos.x / scale, pos.y / scale);
        pixel_to_cell(unscaled, config.tile_size, config.topology)
    }
}
