// src/renderer.rs
use eframe::egui::{self, Color32, ColorImage, Pos2, Rect, Shape, Stroke, TextureHandle, TextureOptions, Vec2};
use std::collections::HashMap;

use crate::document::MapDocument;
use crate::geometry::{hex_outline, tile_rect, CellPos, Topology};
use crate::state::EditorState;
use crate::tile::TileRef;
use crate::tileset::{Tileset, TilesetCatalog};

const PLACEHOLDER_COLOR: Color32 = Color32::from_rgb(255, 0, 255);
const BACKGROUND_COLOR: Color32 = Color32::from_gray(40);
const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(40, 40, 40, 40);
const CURSOR_COLOR: Color32 = Color32::from_rgb(255, 210, 0);

/// One tile to draw, in unzoomed map pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDraw {
    pub layer: usize,
    pub cell: CellPos,
    pub rect: Rect,
    pub tile: TileRef,
}

/// GPU textures for tileset images, keyed by tileset id.
#[derive(Default)]
pub struct TilesetTextures {
    textures: HashMap<u32, TextureHandle>,
}

impl std::fmt::Debug for TilesetTextures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TilesetTextures")
            .field("loaded", &self.textures.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TilesetTextures {
    /// Uploads a decoded tileset image, replacing any previous texture.
    pub fn load(&mut self, ctx: &egui::Context, tileset: &Tileset, image: &image::RgbaImage) {
        let size = [image.width() as usize, image.height() as usize];
        let color_image = ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        let handle = ctx.load_texture(
            format!("tileset_{}", tileset.id),
            color_image,
            TextureOptions::NEAREST,
        );
        log::debug!("Uploaded tileset {} texture {}×{}", tileset.id, size[0], size[1]);
        self.textures.insert(tileset.id, handle);
    }

    pub fn get(&self, tileset_id: u32) -> Option<&TextureHandle> {
        self.textures.get(&tileset_id)
    }
}

/// Draws a map by replaying the coordinate transform over its layers.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub show_grid: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { show_grid: true }
    }
}

impl Renderer {
    pub fn new(show_grid: bool) -> Self {
        Self { show_grid }
    }

    /// Every non-empty cell of every visible layer, bottom layer first.
    pub fn draw_list(document: &MapDocument) -> Vec<TileDraw> {
        let config = document.config();
        document
            .layers()
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.visible)
            .flat_map(|(index, layer)| {
                layer.tiles().iter_tiles().map(move |(cell, tile)| TileDraw {
                    layer: index,
                    cell,
                    rect: tile_rect(cell, config.tile_size, config.topology),
                    tile,
                })
            })
            .collect()
    }

    /// Texture coordinates of `tile` within its tileset image.
    fn uv_rect(tileset: &Tileset, tile: TileRef) -> Rect {
        let [w, h] = tileset.image_size();
        if w == 0 || h == 0 {
            return Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        }
        let src = tileset.source_rect(tile);
        Rect::from_min_max(
            Pos2::new(src.min.x / w as f32, src.min.y / h as f32),
            Pos2::new(src.max.x / w as f32, src.max.y / h as f32),
        )
    }

    /// Paints the session's map with its top-left corner at `origin`.
    pub fn render(
        &self,
        painter: &egui::Painter,
        origin: Pos2,
        state: &EditorState,
        catalog: &TilesetCatalog,
        textures: &TilesetTextures,
    ) {
        let document = state.document();
        let config = document.config();
        let zoom = state.zoom_factor();
        let to_screen = |rect: Rect| {
            Rect::from_min_size(origin + rect.min.to_vec2() * zoom, rect.size() * zoom)
        };

        painter.rect_filled(
            Rect::from_min_size(origin, config.canvas_size() * zoom),
            0.0,
            BACKGROUND_COLOR,
        );

        for draw in Self::draw_list(document) {
            let rect = to_screen(draw.rect);
            let texture = catalog
                .resolve(draw.tile)
                .filter(|ts| ts.contains(draw.tile))
                .and_then(|ts| textures.get(ts.id).map(|tex| (ts, tex)));
            match texture {
                Some((tileset, tex)) => {
                    painter.image(tex.id(), rect, Self::uv_rect(tileset, draw.tile), Color32::WHITE);
                }
                None => {
                    painter.rect_filled(rect, 0.0, PLACEHOLDER_COLOR);
                }
            }
        }

        if self.show_grid {
            let stroke = Stroke::new(1.0, GRID_COLOR);
            for y in 0..config.height as i32 {
                for x in 0..config.width as i32 {
                    Self::outline_cell(painter, origin, zoom, config.tile_size, config.topology, CellPos::new(x, y), stroke);
                }
            }
        }

        if let Some(cell) = state.cursor() {
            let stroke = Stroke::new(2.0, CURSOR_COLOR);
            Self::outline_cell(painter, origin, zoom, config.tile_size, config.topology, cell, stroke);
        }
    }

    fn outline_cell(
        painter: &egui::Painter,
        origin: Pos2,
        zoom: f32,
        tile_size: u32,
        topology: Topology,
        cell: CellPos,
        stroke: Stroke,
    ) {
        match topology {
            Topology::Grid => {
                let rect = tile_rect(cell, tile_size, topology);
                let rect = Rect::from_min_size(origin + rect.min.to_vec2() * zoom, rect.size() * zoom);
                painter.rect_stroke(rect, 0.0, stroke);
            }
            Topology::Hex => {
                let points = hex_outline(cell, tile_size)
                    .iter()
                    .map(|p| origin + p.to_vec2() * zoom)
                    .collect();
                painter.add(Shape::closed_line(points, stroke));
            }
        }
    }

    /// Screen size of the canvas for the current zoom.
    pub fn canvas_size(state: &EditorState) -> Vec2 {
        state.document().config().canvas_size() * state.zoom_factor()
    }
}
