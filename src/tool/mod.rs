pub mod types;
mod trait_def;

pub use trait_def::{PaintSource, PaintTool};
pub use types::ToolType;

// Re-export specific tool implementations
pub use types::brush::BrushTool;
pub use types::eraser::EraserTool;
pub use types::fill::FillTool;
pub use types::stamp::StampTool;
