use crate::geometry::CellPos;
use crate::layer::TileGrid;
use crate::tile::TileRef;
use crate::tileset::TileSelection;

/// What the user currently has picked in the tileset palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaintSource<'a> {
    pub tile: Option<TileRef>,
    pub block: Option<&'a TileSelection>,
}

impl<'a> PaintSource<'a> {
    pub fn tile(tile: TileRef) -> Self {
        Self {
            tile: Some(tile),
            block: None,
        }
    }
}

/// A paint tool maps the current tile grid, a target cell and the picked
/// tiles to a new grid.
///
/// `apply` never writes into `grid`. It returns `None` when the application
/// changes nothing (out-of-bounds target, nothing selected, same value) so
/// the caller has nothing to publish.
pub trait PaintTool {
    fn name(&self) -> &'static str;

    /// Whether the tool does anything without a selected tile.
    fn requires_tile(&self) -> bool {
        true
    }

    fn apply(&self, grid: &TileGrid, target: CellPos, source: &PaintSource<'_>) -> Option<TileGrid>;
}
