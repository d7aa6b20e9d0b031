use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EditorError;

/// The tiling scheme of a map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Orthogonal square grid
    #[default]
    Grid,
    /// Flat-topped hexagons, odd columns shifted down by half a tile
    Hex,
}

impl Topology {
    pub const ALL: [Topology; 2] = [Topology::Grid, Topology::Hex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topology::Grid => "grid",
            Topology::Hex => "hex",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Topology::Grid),
            "hex" => Ok(Topology::Hex),
            other => Err(EditorError::UnknownTopology(other.to_string())),
        }
    }
}

/// A map cell address: `x` is the column, `y` the row.
///
/// Signed so that pixel positions left of or above the canvas map to
/// negative cells, which every bounds check then rejects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the cell shifted by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns `true` when `0 <= x < width` and `0 <= y < height`
    pub fn in_bounds(self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_topologies() {
        assert_eq!("grid".parse::<Topology>().unwrap(), Topology::Grid);
        assert_eq!("hex".parse::<Topology>().unwrap(), Topology::Hex);
    }

    #[test]
    fn rejects_unknown_topology() {
        let err = "iso".parse::<Topology>().unwrap_err();
        assert!(matches!(err, EditorError::UnknownTopology(name) if name == "iso"));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Topology::Hex).unwrap(), "\"hex\"");
        assert!(serde_json::from_str::<Topology>("\"square\"").is_err());
    }

    #[test]
    fn bounds_check_rejects_negative_cells() {
        assert!(CellPos::new(0, 0).in_bounds(1, 1));
        assert!(!CellPos::new(-1, 0).in_bounds(5, 5));
        assert!(!CellPos::new(0, 5).in_bounds(5, 5));
    }
}
