//! Snapshots of the current map as JSON or as a flattened image.

use image::{imageops, RgbaImage};
use std::collections::HashMap;

use crate::error::EditorResult;
use crate::layer::Layer;
use crate::state::{EditorState, StoredMap};
use crate::tileset::TilesetCatalog;

/// What goes into an export. The default exports every layer as it is,
/// hidden ones included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Only export the active layer
    pub active_layer_only: bool,
    /// Leave out layers whose visibility is off
    pub skip_hidden: bool,
}

fn exported_layers<'a>(state: &'a EditorState, options: &ExportOptions) -> Vec<&'a Layer> {
    if options.active_layer_only {
        return vec![state.active_layer()];
    }
    state
        .document()
        .layers()
        .iter()
        .filter(|layer| layer.visible || !options.skip_hidden)
        .collect()
}

/// The stored map shape, limited to the exported layers.
pub fn export_stored(state: &EditorState, options: &ExportOptions) -> StoredMap {
    let mut stored = state.document().to_stored();
    let ids: Vec<String> = exported_layers(state, options)
        .iter()
        .map(|layer| layer.id.to_string())
        .collect();
    stored.layers.retain(|layer| ids.contains(&layer.id));
    stored
}

pub fn export_json(state: &EditorState, options: &ExportOptions) -> EditorResult<String> {
    Ok(serde_json::to_string_pretty(&export_stored(state, options))?)
}

/// Flattens the exported layers into one image, bottom layer first.
///
/// `images` holds the decoded tileset images by tileset id. Tiles whose
/// tileset or image is missing, or that point outside their tileset's
/// current grid, are skipped.
pub fn export_png(
    state: &EditorState,
    catalog: &TilesetCatalog,
    images: &HashMap<u32, RgbaImage>,
    options: &ExportOptions,
) -> RgbaImage {
    let config = state.document().config();
    let size = config.canvas_size();
    let mut out = RgbaImage::new(size.x.ceil() as u32, size.y.ceil() as u32);
    let ts = config.tile_size;
    let mut skipped = 0usize;

    for layer in exported_layers(state, options) {
        for (cell, tile) in layer.tiles().iter_tiles() {
            let source = catalog
                .resolve(tile)
                .filter(|tileset| tileset.contains(tile))
                .and_then(|tileset| images.get(&tileset.id).map(|img| (tileset, img)));
            let Some((tileset, img)) = source else {
                skipped += 1;
                continue;
            };

            let src = tileset.source_rect(tile);
            let mut sub = imageops::crop_imm(
                img,
                src.min.x as u32,
                src.min.y as u32,
                tileset.tile_width,
                tileset.tile_height,
            )
            .to_image();
            if sub.width() != ts || sub.height() != ts {
                sub = imageops::resize(&sub, ts, ts, imageops::FilterType::Nearest);
            }

            let pos = crate::geometry::cell_to_pixel(cell, ts, config.topology);
            imageops::overlay(&mut out, &sub, pos.x.round() as i64, pos.y.round() as i64);
        }
    }

    if skipped > 0 {
        log::warn!("PNG export skipped {skipped} tiles with missing tilesets or images");
    }
    out
}
