use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{EditorError, EditorResult};

/// Separator of the stored `"tilesetId,x,y"` form.
pub const TILE_REF_SEPARATOR: char = ',';

/// A single tile inside a tileset: the value painted into map cells.
///
/// Cells hold `Option<TileRef>`; `None` is the empty cell. The string form
/// only exists at the serialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileRef {
    pub tileset_id: u32,
    /// Column within the tileset grid
    pub x: u32,
    /// Row within the tileset grid
    pub y: u32,
}

impl TileRef {
    pub const fn new(tileset_id: u32, x: u32, y: u32) -> Self {
        Self { tileset_id, x, y }
    }

    /// Canonical stored form, e.g. `"3,0,2"`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses the stored form: exactly three unsigned integers written with
    /// ASCII digits only (no sign, no whitespace).
    pub fn decode(s: &str) -> EditorResult<Self> {
        let malformed = || EditorError::MalformedTileRef(s.to_string());

        let mut parts = s.split(TILE_REF_SEPARATOR);
        let mut next = || -> EditorResult<u32> {
            let part = parts.next().ok_or_else(malformed)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse::<u32>().map_err(|_| malformed())
        };
        let tile = TileRef::new(next()?, next()?, next()?);

        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(tile)
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.tileset_id,
            self.x,
            self.y,
            sep = TILE_REF_SEPARATOR
        )
    }
}

impl FromStr for TileRef {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Serialize for TileRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TileRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TileRef::decode(&s).map_err(serde::de::Error::custom)
    }
}
