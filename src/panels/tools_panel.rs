use eframe::egui;

use crate::app::TileMapApp;
use crate::command::Command;
use crate::geometry::Topology;
use crate::tool::{PaintTool, ToolType};

const MAX_MAP_CELLS: usize = 1024;
const MAX_TILE_SIZE: u32 = 256;

pub fn tools_panel(app: &mut TileMapApp, ctx: &egui::Context) {
    let mut commands = Vec::new();
    let mut new_map = false;
    #[cfg(not(target_arch = "wasm32"))]
    let mut export = false;

    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            for tool in ToolType::ALL {
                if ui.selectable_label(app.state.tool() == tool, tool.label()).clicked() {
                    log::info!("Tool selected from UI: {}", tool.label());
                    commands.push(Command::SetTool(tool));
                }
            }
            ui.separator();

            if ui.button("-").clicked() {
                app.state.zoom_out();
            }
            ui.label(format!("{}%", app.state.zoom()));
            if ui.button("+").clicked() {
                app.state.zoom_in();
            }
            if ui.checkbox(&mut app.config.show_grid, "Grid").changed() {
                app.renderer.show_grid = app.config.show_grid;
            }
            ui.separator();

            ui.label("Size");
            ui.add(egui::DragValue::new(&mut app.resize_to[0]).range(1..=MAX_MAP_CELLS));
            ui.label("x");
            ui.add(egui::DragValue::new(&mut app.resize_to[1]).range(1..=MAX_MAP_CELLS));
            if ui.button("Resize").clicked() {
                commands.push(Command::ResizeMap {
                    width: app.resize_to[0],
                    height: app.resize_to[1],
                });
            }
            ui.separator();

            egui::ComboBox::from_id_salt("topology")
                .selected_text(app.geometry_to.0.as_str())
                .show_ui(ui, |ui| {
                    for topology in Topology::ALL {
                        ui.selectable_value(&mut app.geometry_to.0, topology, topology.as_str());
                    }
                });
            ui.add(
                egui::DragValue::new(&mut app.geometry_to.1)
                    .range(1..=MAX_TILE_SIZE)
                    .suffix("px"),
            );
            if ui.button("Apply").clicked() {
                commands.push(Command::SetGeometry {
                    topology: app.geometry_to.0,
                    tile_size: app.geometry_to.1,
                });
            }
            ui.separator();

            #[cfg(not(target_arch = "wasm32"))]
            if ui.button("Export").clicked() {
                export = true;
            }
            if ui.button("New map").clicked() {
                new_map = true;
            }
        });
    });

    for command in commands {
        app.execute(command);
    }
    #[cfg(not(target_arch = "wasm32"))]
    if export {
        app.export_files();
    }
    if new_map {
        app.new_map();
    }
}

pub fn status_bar(app: &TileMapApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let config = app.state.document().config();
            ui.label(format!(
                "{}x{} {} map, {}px tiles",
                config.width, config.height, config.topology, config.tile_size
            ));
            ui.separator();
            match app.state.cursor() {
                Some(cell) => ui.label(format!("Cell {}", cell)),
                None => ui.label("Cell -"),
            };
            ui.separator();
            let tool = app.state.tool();
            ui.label(format!("Tool: {}", tool.label()));
            if tool.requires_tile() && app.state.selected_tile().is_none() {
                ui.label("(pick a tile from a tileset)");
            }
            if let Some(status) = &app.status {
                ui.separator();
                ui.label(status.as_str());
            }
        });
    });
}
