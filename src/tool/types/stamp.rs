use crate::geometry::CellPos;
use crate::layer::TileGrid;
use super::super::trait_def::{PaintSource, PaintTool};
use super::brush::BrushTool;

/// Stamps the selected multi-tile block with its top-left corner on the
/// target. Empty entries of the block and cells past the map edge are
/// skipped. Without a block it behaves like the small brush.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StampTool;

impl PaintTool for StampTool {
    fn name(&self) -> &'static str {
        "Stamp"
    }

    fn apply(&self, grid: &TileGrid, target: CellPos, source: &PaintSource<'_>) -> Option<TileGrid> {
        let Some(block) = source.block else {
            return BrushTool::SMALL.apply(grid, target, source);
        };
        if !grid.contains(target) {
            return None;
        }

        let mut next = grid.clone();
        let mut changed = false;
        for dy in 0..block.height {
            for dx in 0..block.width {
                let Some(tile) = block.get(dx, dy) else {
                    continue;
                };
                let cell = target.offset(dx as i32, dy as i32);
                if grid.contains(cell) && grid.get(cell) != Some(tile) {
                    next.set(cell, Some(tile));
                    changed = true;
                }
            }
        }
        changed.then_some(next)
    }
}
