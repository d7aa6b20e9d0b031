mod central_panel;
mod layers_panel;
mod tileset_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use layers_panel::layers_panel;
pub use tileset_panel::tileset_panel;
pub use tools_panel::{status_bar, tools_panel};
