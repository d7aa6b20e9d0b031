use crate::geometry::CellPos;
use crate::layer::TileGrid;
use super::super::trait_def::{PaintSource, PaintTool};

/// Paints the selected tile into a square block centred on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushTool {
    /// Cells painted on each side of the target; 0 paints only the target
    pub radius: i32,
}

impl BrushTool {
    pub const SMALL: BrushTool = BrushTool { radius: 0 };
    pub const LARGE: BrushTool = BrushTool { radius: 1 };
}

impl PaintTool for BrushTool {
    fn name(&self) -> &'static str {
        if self.radius == 0 { "Brush" } else { "LargeBrush" }
    }

    fn apply(&self, grid: &TileGrid, target: CellPos, source: &PaintSource<'_>) -> Option<TileGrid> {
        let tile = source.tile?;
        // An off-map centre cancels the whole dab, even if some neighbours
        // would land on the map.
        if !grid.contains(target) {
            return None;
        }

        let mut next = grid.clone();
        let mut changed = false;
        for dy in -self.radius..=self.radius {
            for dx in -self.radius..=self.radius {
                let cell = target.offset(dx, dy);
                if grid.contains(cell) && grid.get(cell) != Some(tile) {
                    next.set(cell, Some(tile));
                    changed = true;
                }
            }
        }
        changed.then_some(next)
    }
}
