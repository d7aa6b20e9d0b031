use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::geometry::CellPos;
use crate::tile::TileRef;

/// A unique, stable identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense row-major `height × width` array of optional tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<TileRef>>,
}

impl TileGrid {
    /// A grid with every cell empty
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Builds a grid from rows; every row must be exactly `width` long.
    pub fn from_rows(width: usize, rows: Vec<Vec<Option<TileRef>>>) -> Option<Self> {
        let height = rows.len();
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, cell: CellPos) -> bool {
        cell.in_bounds(self.width, self.height)
    }

    #[inline]
    fn index(&self, cell: CellPos) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.width + cell.x as usize)
    }

    /// The tile at `cell`; `None` for empty or out-of-bounds cells.
    pub fn get(&self, cell: CellPos) -> Option<TileRef> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    /// Writes `value` at `cell`. Returns `false` (and writes nothing) when
    /// `cell` is out of bounds.
    pub fn set(&mut self, cell: CellPos, value: Option<TileRef>) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// A copy resized to `width × height`. Cells inside both the old and new
    /// bounds keep their value; newly exposed cells are empty.
    pub fn resized(&self, width: usize, height: usize) -> Self {
        let mut out = Self::new(width, height);
        let keep_w = self.width.min(width);
        for y in 0..self.height.min(height) {
            let src = y * self.width;
            let dst = y * width;
            out.cells[dst..dst + keep_w].copy_from_slice(&self.cells[src..src + keep_w]);
        }
        out
    }

    /// Non-empty cells with their positions, row by row.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (CellPos, TileRef)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|tile| (CellPos::new((i % width) as i32, (i / width) as i32), tile))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// The cells as `height` rows of `width` entries.
    pub fn rows(&self) -> Vec<Vec<Option<TileRef>>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.cells.chunks(self.width).map(|row| row.to_vec()).collect()
    }
}

/// One independently visible grid of tiles.
///
/// The tiles sit behind an `Arc`: painting publishes a new grid instead of
/// writing into the shared one, so clones of a layer taken earlier keep
/// seeing the old contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Unique identifier for the layer
    pub id: LayerId,
    /// Display name of the layer
    pub name: String,
    /// Whether the layer is currently visible
    pub visible: bool,
    tiles: Arc<TileGrid>,
}

impl Layer {
    pub fn new(name: &str, width: usize, height: usize) -> Self {
        Self::with_tiles(LayerId::new(), name, true, TileGrid::new(width, height))
    }

    pub fn with_tiles(id: LayerId, name: &str, visible: bool, tiles: TileGrid) -> Self {
        Self {
            id,
            name: name.to_string(),
            visible,
            tiles: Arc::new(tiles),
        }
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    /// Shared handle to the current tile array.
    pub fn tiles_arc(&self) -> Arc<TileGrid> {
        Arc::clone(&self.tiles)
    }

    /// Replaces the tile array wholesale.
    pub fn set_tiles(&mut self, tiles: TileGrid) {
        self.tiles = Arc::new(tiles);
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }
}
