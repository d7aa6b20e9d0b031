use crate::geometry::CellPos;
use crate::layer::TileGrid;
use super::super::trait_def::{PaintSource, PaintTool};

const NEIGHBOURS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Bucket fill: replaces the 4-connected region of cells equal to the
/// target cell with the selected tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillTool;

impl PaintTool for FillTool {
    fn name(&self) -> &'static str {
        "Fill"
    }

    fn apply(&self, grid: &TileGrid, target: CellPos, source: &PaintSource<'_>) -> Option<TileGrid> {
        let tile = source.tile?;
        if !grid.contains(target) {
            return None;
        }
        let original = grid.get(target);
        if original == Some(tile) {
            return None;
        }

        let width = grid.width();
        let mut next = grid.clone();
        // Cells are marked when pushed, so each one enters the stack at most
        // once and the stack never outgrows the grid.
        let mut queued = vec![false; width * grid.height()];
        let mut stack = vec![target];
        queued[target.y as usize * width + target.x as usize] = true;

        while let Some(cell) = stack.pop() {
            next.set(cell, Some(tile));
            for (dx, dy) in NEIGHBOURS {
                let n = cell.offset(dx, dy);
                if !grid.contains(n) {
                    continue;
                }
                let i = n.y as usize * width + n.x as usize;
                if !queued[i] && grid.get(n) == original {
                    queued[i] = true;
                    stack.push(n);
                }
            }
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileRef;

    #[test]
    fn fill_stops_at_different_tiles() {
        let wall = TileRef::new(0, 0, 0);
        let paint = TileRef::new(0, 1, 0);
        let mut grid = TileGrid::new(5, 5);
        // vertical wall at x = 2
        for y in 0..5 {
            grid.set(CellPos::new(2, y), Some(wall));
        }

        let next = FillTool
            .apply(&grid, CellPos::new(0, 0), &PaintSource::tile(paint))
            .unwrap();
        for y in 0..5 {
            assert_eq!(next.get(CellPos::new(1, y)), Some(paint));
            assert_eq!(next.get(CellPos::new(2, y)), Some(wall));
            assert_eq!(next.get(CellPos::new(3, y)), None);
        }
    }

    #[test]
    fn fill_is_not_diagonal() {
        let a = TileRef::new(0, 0, 0);
        let b = TileRef::new(0, 1, 0);
        let mut grid = TileGrid::new(2, 2);
        grid.set(CellPos::new(0, 0), Some(a));
        grid.set(CellPos::new(1, 1), Some(a));

        let next = FillTool
            .apply(&grid, CellPos::new(0, 0), &PaintSource::tile(b))
            .unwrap();
        assert_eq!(next.get(CellPos::new(0, 0)), Some(b));
        assert_eq!(next.get(CellPos::new(1, 1)), Some(a));
    }

    #[test]
    fn fill_replaces_a_tile_region() {
        let a = TileRef::new(0, 0, 0);
        let b = TileRef::new(2, 3, 4);
        let mut grid = TileGrid::new(3, 1);
        grid.set(CellPos::new(0, 0), Some(a));
        grid.set(CellPos::new(1, 0), Some(a));

        let next = FillTool
            .apply(&grid, CellPos::new(1, 0), &PaintSource::tile(b))
            .unwrap();
        assert_eq!(next.get(CellPos::new(0, 0)), Some(b));
        assert_eq!(next.get(CellPos::new(1, 0)), Some(b));
        assert_eq!(next.get(CellPos::new(2, 0)), None);
    }
}
