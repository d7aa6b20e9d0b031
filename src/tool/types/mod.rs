pub mod brush;
pub mod eraser;
pub mod fill;
pub mod stamp;

pub use brush::BrushTool;
pub use eraser::EraserTool;
pub use fill::FillTool;
pub use stamp::StampTool;

use serde::{Deserialize, Serialize};

use super::trait_def::{PaintSource, PaintTool};
use crate::geometry::CellPos;
use crate::layer::TileGrid;

/// Every tool the editor offers. Dispatching through this enum keeps the
/// selected tool a plain value that can be stored and compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    /// Paints the target cell
    #[default]
    Brush,
    /// Paints the 3×3 block around the target
    LargeBrush,
    /// Flood-fills the 4-connected region under the target
    Fill,
    /// Clears the target cell
    Eraser,
    /// Stamps the selected tile block with its top-left at the target
    Stamp,
}

impl ToolType {
    pub const ALL: [ToolType; 5] = [
        ToolType::Brush,
        ToolType::LargeBrush,
        ToolType::Fill,
        ToolType::Eraser,
        ToolType::Stamp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolType::Brush => "Brush",
            ToolType::LargeBrush => "Large brush",
            ToolType::Fill => "Fill",
            ToolType::Eraser => "Eraser",
            ToolType::Stamp => "Stamp",
        }
    }
}

impl PaintTool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Brush => BrushTool::SMALL.name(),
            Self::LargeBrush => BrushTool::LARGE.name(),
            Self::Fill => FillTool.name(),
            Self::Eraser => EraserTool.name(),
            Self::Stamp => StampTool.name(),
        }
    }

    fn requires_tile(&self) -> bool {
        match self {
            Self::Brush => BrushTool::SMALL.requires_tile(),
            Self::LargeBrush => BrushTool::LARGE.requires_tile(),
            Self::Fill => FillTool.requires_tile(),
            Self::Eraser => EraserTool.requires_tile(),
            Self::Stamp => StampTool.requires_tile(),
        }
    }

    fn apply(&self, grid: &TileGrid, target: CellPos, source: &PaintSource<'_>) -> Option<TileGrid> {
        match self {
            Self::Brush => BrushTool::SMALL.apply(grid, target, source),
            Self::LargeBrush => BrushTool::LARGE.apply(grid, target, source),
            Self::Fill => FillTool.apply(grid, target, source),
            Self::Eraser => EraserTool.apply(grid, target, source),
            Self::Stamp => StampTool.apply(grid, target, source),
        }
    }
}
