use egui::{pos2, vec2, Rect};
use serde::{Deserialize, Serialize};

use crate::error::EditorResult;
use crate::tile::TileRef;

/// Decodes a tileset image (PNG, JPEG, ...) into RGBA pixels.
pub fn decode_tileset_image(bytes: &[u8]) -> EditorResult<image::RgbaImage> {
    let img = image::load_from_memory(bytes)?;
    log::debug!("Decoded tileset image: {}x{}", img.width(), img.height());
    Ok(img.to_rgba8())
}

/// A tileset record as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tileset {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub image_url: String,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Number of tile columns in the image
    pub grid_width: u32,
    /// Number of tile rows in the image
    pub grid_height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub in_collection: bool,
}

impl Tileset {
    /// Picks the tile at `(x, y)` if it exists in this tileset's grid.
    pub fn tile_ref(&self, x: u32, y: u32) -> Option<TileRef> {
        (x < self.grid_width && y < self.grid_height).then(|| TileRef::new(self.id, x, y))
    }

    /// Whether `tile` points into this tileset's current grid.
    pub fn contains(&self, tile: TileRef) -> bool {
        tile.tileset_id == self.id && tile.x < self.grid_width && tile.y < self.grid_height
    }

    /// All pickable tiles, row by row.
    pub fn tile_refs(&self) -> impl Iterator<Item = TileRef> + '_ {
        (0..self.grid_height)
            .flat_map(move |y| (0..self.grid_width).map(move |x| TileRef::new(self.id, x, y)))
    }

    pub fn tile_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Pixel rectangle of `tile` inside the tileset image.
    pub fn source_rect(&self, tile: TileRef) -> Rect {
        Rect::from_min_size(
            pos2(
                (tile.x * self.tile_width) as f32,
                (tile.y * self.tile_height) as f32,
            ),
            vec2(self.tile_width as f32, self.tile_height as f32),
        )
    }

    /// Pixel size of the whole tileset image.
    pub fn image_size(&self) -> [u32; 2] {
        [
            self.grid_width * self.tile_width,
            self.grid_height * self.tile_height,
        ]
    }
}

/// The tilesets available to the editor, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TilesetCatalog {
    tilesets: Vec<Tileset>,
}

impl TilesetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON list of tileset records.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a tileset, replacing any existing one with the same id.
    pub fn insert(&mut self, tileset: Tileset) {
        match self.tilesets.iter_mut().find(|t| t.id == tileset.id) {
            Some(existing) => *existing = tileset,
            None => self.tilesets.push(tileset),
        }
    }

    pub fn get(&self, id: u32) -> Option<&Tileset> {
        self.tilesets.iter().find(|t| t.id == id)
    }

    /// The tileset `tile` belongs to, if it still exists.
    pub fn resolve(&self, tile: TileRef) -> Option<&Tileset> {
        self.get(tile.tileset_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tileset> {
        self.tilesets.iter()
    }

    pub fn len(&self) -> usize {
        self.tilesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tilesets.is_empty()
    }
}

/// A rectangular block of tiles picked from a tileset, stamped as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSelection {
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` entries
    pub tiles: Vec<Option<TileRef>>,
}

impl TileSelection {
    /// Builds a block from the inclusive rectangle spanned by two tileset
    /// cells, given in any order and clipped to the tileset grid.
    ///
    /// Returns `None` when the rectangle lies entirely outside the tileset.
    pub fn from_tileset_rect(tileset: &Tileset, a: (u32, u32), b: (u32, u32)) -> Option<Self> {
        if tileset.grid_width == 0 || tileset.grid_height == 0 {
            return None;
        }
        let x0 = a.0.min(b.0);
        let y0 = a.1.min(b.1);
        if x0 >= tileset.grid_width || y0 >= tileset.grid_height {
            return None;
        }
        let x1 = a.0.max(b.0).min(tileset.grid_width - 1);
        let y1 = a.1.max(b.1).min(tileset.grid_height - 1);

        let width = (x1 - x0 + 1) as usize;
        let height = (y1 - y0 + 1) as usize;
        let tiles = (y0..=y1)
            .flat_map(|y| (x0..=x1).map(move |x| tileset.tile_ref(x, y)))
            .collect();

        Some(Self {
            width,
            height,
            tiles,
        })
    }

    /// The tile at offset `(dx, dy)` from the block's top-left corner.
    pub fn get(&self, dx: usize, dy: usize) -> Option<TileRef> {
        if dx >= self.width || dy >= self.height {
            return None;
        }
        self.tiles.get(dy * self.width + dx).copied().flatten()
    }

    /// The top-left tile, used when a single tile is needed.
    pub fn first(&self) -> Option<TileRef> {
        self.get(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tileset() -> Tileset {
        Tileset {
            id: 7,
            name: "terrain".into(),
            image_url: "terrain.png".into(),
            tile_width: 16,
            tile_height: 16,
            grid_width: 4,
            grid_height: 3,
            owner: None,
            is_public: false,
            in_collection: false,
        }
    }

    #[test]
    fn picking_respects_grid_bounds() {
        let ts = tileset();
        assert_eq!(ts.tile_ref(3, 2), Some(TileRef::new(7, 3, 2)));
        assert_eq!(ts.tile_ref(4, 0), None);
        assert_eq!(ts.tile_ref(0, 3), None);
        assert_eq!(ts.tile_refs().count(), ts.tile_count());
    }

    #[test]
    fn source_rect_is_in_image_pixels() {
        let rect = tileset().source_rect(TileRef::new(7, 2, 1));
        assert_eq!(rect.min, pos2(32.0, 16.0));
        assert_eq!(rect.size(), vec2(16.0, 16.0));
    }

    #[test]
    fn selection_block_is_clipped_and_ordered() {
        let ts = tileset();
        let sel = TileSelection::from_tileset_rect(&ts, (9, 1), (2, 0)).unwrap();
        assert_eq!((sel.width, sel.height), (2, 2));
        assert_eq!(sel.first(), Some(TileRef::new(7, 2, 0)));
        assert_eq!(sel.get(1, 1), Some(TileRef::new(7, 3, 1)));
        assert_eq!(sel.get(2, 0), None);

        assert!(TileSelection::from_tileset_rect(&ts, (5, 5), (6, 6)).is_none());
    }

    #[test]
    fn catalog_parses_record_list() {
        let json = r#"[{"id":1,"imageUrl":"a.png","tileWidth":32,"tileHeight":32,"gridWidth":8,"gridHeight":8}]"#;
        let catalog = TilesetCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let ts = catalog.get(1).unwrap();
        assert_eq!(ts.image_size(), [256, 256]);
        assert!(!ts.is_public);
    }
}
