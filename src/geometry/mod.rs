mod topology;
mod transform;

pub use topology::{CellPos, Topology};
pub use transform::{
    canvas_size, cell_to_pixel, hex_outline, pixel_to_cell, tile_rect, HEX_ADVANCE_FACTOR,
    HEX_WIDTH_FACTOR,
};
