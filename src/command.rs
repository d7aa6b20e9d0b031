use serde::{Deserialize, Serialize};

use crate::error::EditorResult;
use crate::geometry::{CellPos, Topology};
use crate::state::EditorState;
use crate::tile::TileRef;
use crate::tileset::TileSelection;
use crate::tool::ToolType;

/// Edits the UI asks the editor to perform. Panels emit these instead of
/// touching the state directly; there is no undo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    AddLayer,
    RemoveLayer { index: usize },
    RenameLayer { index: usize, name: String },
    SetLayerVisibility { index: usize, visible: bool },
    ToggleLayerVisibility { index: usize },
    SelectLayer { index: usize },
    MoveLayer { from: usize, to: usize },
    ResizeMap { width: usize, height: usize },
    SetGeometry { topology: Topology, tile_size: u32 },
    SetTool(ToolType),
    SelectTile(Option<TileRef>),
    SelectBlock(TileSelection),
    ClearSelection,
    Paint { cell: CellPos },
}

impl Command {
    /// Applies the command. Invalid layer indices and sizes are rejected
    /// before anything changes.
    pub fn execute(&self, state: &mut EditorState) -> EditorResult<()> {
        match self {
            Command::AddLayer => {
                state.add_layer();
            }
            Command::RemoveLayer { index } => {
                state.remove_layer(*index)?;
            }
            Command::RenameLayer { index, name } => state.rename_layer(*index, name)?,
            Command::SetLayerVisibility { index, visible } => {
                state.set_layer_visibility(*index, *visible)?
            }
            Command::ToggleLayerVisibility { index } => {
                state.toggle_layer_visibility(*index)?;
            }
            Command::SelectLayer { index } => state.set_active_layer(*index)?,
            Command::MoveLayer { from, to } => state.move_layer(*from, *to)?,
            Command::ResizeMap { width, height } => state.resize_map(*width, *height)?,
            Command::SetGeometry {
                topology,
                tile_size,
            } => state.set_geometry(*topology, *tile_size)?,
            Command::SetTool(tool) => state.set_tool(*tool),
            Command::SelectTile(tile) => state.select_tile(*tile),
            Command::SelectBlock(block) => state.select_block(block.clone()),
            Command::ClearSelection => state.clear_selection(),
            Command::Paint { cell } => {
                state.paint(*cell);
            }
        }
        Ok(())
    }
}
