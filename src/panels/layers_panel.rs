use eframe::egui;

use crate::app::TileMapApp;
use crate::command::Command;

/// Lists layers top to bottom, the way they stack on the canvas.
pub fn layers_panel(app: &mut TileMapApp, ctx: &egui::Context) {
    let mut commands = Vec::new();

    egui::SidePanel::left("layers_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Layers");

            let active = app.state.active_layer_index();
            let count = app.state.document().layer_count();
            for (index, layer) in app.state.document().layers().iter().enumerate().rev() {
                ui.horizontal(|ui| {
                    let mut visible = layer.visible;
                    if ui.checkbox(&mut visible, "").changed() {
                        commands.push(Command::SetLayerVisibility { index, visible });
                    }
                    if ui.selectable_label(index == active, layer.name.as_str()).clicked() {
                        commands.push(Command::SelectLayer { index });
                    }
                });
            }
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Add").clicked() {
                    commands.push(Command::AddLayer);
                }
                if ui.add_enabled(count > 1, egui::Button::new("Remove")).clicked() {
                    commands.push(Command::RemoveLayer { index: active });
                }
                if ui.add_enabled(active + 1 < count, egui::Button::new("Up")).clicked() {
                    commands.push(Command::MoveLayer { from: active, to: active + 1 });
                }
                if ui.add_enabled(active > 0, egui::Button::new("Down")).clicked() {
                    commands.push(Command::MoveLayer { from: active, to: active - 1 });
                }
            });

            ui.horizontal(|ui| {
                let edit = ui.text_edit_singleline(&mut app.rename_buffer);
                let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if (ui.button("Rename").clicked() || submitted) && !app.rename_buffer.trim().is_empty() {
                    commands.push(Command::RenameLayer {
                        index: active,
                        name: app.rename_buffer.trim().to_owned(),
                    });
                    app.rename_buffer.clear();
                }
            });
        });

    for command in commands {
        app.execute(command);
    }
}
