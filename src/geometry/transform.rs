//! Conversions between map cells and canvas pixels.
//!
//! Every function here is pure. The hex constants below fix the flat-topped
//! layout the renderer and hit-testing agree on; changing either one moves
//! every painted tile.

use egui::{pos2, vec2, Pos2, Rect, Vec2};

use super::{CellPos, Topology};

/// Hex cell width relative to the tile size.
pub const HEX_WIDTH_FACTOR: f32 = 1.15;
/// Horizontal advance between hex columns relative to the hex width.
pub const HEX_ADVANCE_FACTOR: f32 = 0.75;

#[inline]
fn is_odd(col: i32) -> bool {
    col.rem_euclid(2) == 1
}

#[inline]
fn hex_advance(tile_size: u32) -> f32 {
    tile_size as f32 * HEX_WIDTH_FACTOR * HEX_ADVANCE_FACTOR
}

/// Top-left pixel of `cell`.
pub fn cell_to_pixel(cell: CellPos, tile_size: u32, topology: Topology) -> Pos2 {
    let ts = tile_size as f32;
    match topology {
        Topology::Grid => pos2(cell.x as f32 * ts, cell.y as f32 * ts),
        Topology::Hex => {
            let y_offset = if is_odd(cell.x) { ts / 2.0 } else { 0.0 };
            pos2(
                cell.x as f32 * hex_advance(tile_size),
                cell.y as f32 * ts + y_offset,
            )
        }
    }
}

/// The cell under a canvas pixel.
///
/// For hex maps this picks by column strip and then by the staggered row,
/// which is not exact near hexagon edges. Placement and hit-testing both use
/// it, so what the user clicks is what gets painted.
pub fn pixel_to_cell(pos: Pos2, tile_size: u32, topology: Topology) -> CellPos {
    let ts = tile_size as f32;
    match topology {
        Topology::Grid => CellPos::new((pos.x / ts).floor() as i32, (pos.y / ts).floor() as i32),
        Topology::Hex => {
            let col = (pos.x / hex_advance(tile_size)).floor() as i32;
            let stagger = if is_odd(col) { 0.5 } else { 0.0 };
            let row = (pos.y / ts - stagger).floor() as i32;
            CellPos::new(col, row)
        }
    }
}

/// The `tile_size × tile_size` rectangle a tile is drawn into.
pub fn tile_rect(cell: CellPos, tile_size: u32, topology: Topology) -> Rect {
    let ts = tile_size as f32;
    Rect::from_min_size(cell_to_pixel(cell, tile_size, topology), vec2(ts, ts))
}

/// Corner points of the flat-topped hexagon for `cell`, clockwise from top-left.
pub fn hex_outline(cell: CellPos, tile_size: u32) -> [Pos2; 6] {
    let origin = cell_to_pixel(cell, tile_size, Topology::Hex);
    let w = tile_size as f32 * HEX_WIDTH_FACTOR;
    let h = tile_size as f32;
    [
        origin + vec2(w * 0.25, 0.0),
        origin + vec2(w * 0.75, 0.0),
        origin + vec2(w, h * 0.5),
        origin + vec2(w * 0.75, h),
        origin + vec2(w * 0.25, h),
        origin + vec2(0.0, h * 0.5),
    ]
}

/// Pixel extent covered by a `width × height` map once every cell is drawn.
pub fn canvas_size(width: usize, height: usize, tile_size: u32, topology: Topology) -> Vec2 {
    let ts = tile_size as f32;
    if width == 0 || height == 0 {
        return Vec2::ZERO;
    }
    match topology {
        Topology::Grid => vec2(width as f32 * ts, height as f32 * ts),
        Topology::Hex => {
            let stagger = if width > 1 { ts / 2.0 } else { 0.0 };
            vec2(
                (width - 1) as f32 * hex_advance(tile_size) + ts,
                height as f32 * ts + stagger,
            )
        }
    }
}
