use crate::geometry::CellPos;
use crate::layer::TileGrid;
use super::super::trait_def::{PaintSource, PaintTool};

/// Clears the target cell. Works without a selected tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EraserTool;

impl PaintTool for EraserTool {
    fn name(&self) -> &'static str {
        "Eraser"
    }

    fn requires_tile(&self) -> bool {
        false
    }

    fn apply(&self, grid: &TileGrid, target: CellPos, _source: &PaintSource<'_>) -> Option<TileGrid> {
        grid.get(target)?;
        let mut next = grid.clone();
        next.set(target, None);
        Some(next)
    }
}
