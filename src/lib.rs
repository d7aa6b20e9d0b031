#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod layer;
mod panels;
pub mod renderer;
pub mod state;
pub mod tile;
pub mod tileset;
pub mod tool;

pub use app::TileMapApp;
pub use command::Command;
pub use config::EditorConfig;
pub use document::{MapConfig, MapDocument};
pub use error::{EditorError, EditorResult};
pub use geometry::{CellPos, Topology};
pub use input::InputEvent;
pub use layer::{Layer, LayerId, TileGrid};
pub use renderer::Renderer;
pub use state::{EditorState, SharedEditor};
pub use tile::TileRef;
pub use tileset::{TileSelection, Tileset, TilesetCatalog};
pub use tool::{PaintTool, ToolType};
