use eframe::egui::{self, pos2, vec2, Color32, Rect, Stroke, Vec2};

use crate::app::TileMapApp;
use crate::command::Command;
use crate::tileset::{TileSelection, Tileset};

const SELECTION_COLOR: Color32 = Color32::from_rgb(100, 181, 246);
const MISSING_TEXTURE_COLOR: Color32 = Color32::from_gray(60);

/// The tileset palette. Click picks one tile; shift-click picks the block
/// between the last clicked tile and this one.
pub fn tileset_panel(app: &mut TileMapApp, ctx: &egui::Context) {
    let mut commands = Vec::new();

    egui::SidePanel::right("tileset_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Tilesets");
            if app.catalog.is_empty() {
                ui.label("Drop tileset images here to add them.");
                return;
            }
            if ui.button("Clear selection").clicked() {
                commands.push(Command::ClearSelection);
                app.palette_anchor = None;
            }

            let tilesets: Vec<Tileset> = app.catalog.iter().cloned().collect();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for tileset in &tilesets {
                    ui.separator();
                    ui.label(tileset.name.as_str());
                    palette(app, ui, tileset, &mut commands);
                }
            });
        });

    for command in commands {
        app.execute(command);
    }
}

fn palette(app: &mut TileMapApp, ui: &mut egui::Ui, tileset: &Tileset, commands: &mut Vec<Command>) {
    let [w, h] = tileset.image_size();
    if w == 0 || h == 0 {
        return;
    }
    let scale = (ui.available_width() / w as f32).clamp(0.25, 2.0);
    let (response, painter) =
        ui.allocate_painter(vec2(w as f32, h as f32) * scale, egui::Sense::click());
    let rect = response.rect;
    let tile_px = vec2(tileset.tile_width as f32, tileset.tile_height as f32) * scale;

    match app.textures.get(tileset.id) {
        Some(texture) => painter.image(
            texture.id(),
            rect,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
            Color32::WHITE,
        ),
        None => painter.rect_filled(rect, 0.0, MISSING_TEXTURE_COLOR),
    };

    let block_rect = |x: u32, y: u32, width: usize, height: usize| {
        Rect::from_min_size(
            rect.min + vec2(x as f32 * tile_px.x, y as f32 * tile_px.y),
            vec2(width as f32 * tile_px.x, height as f32 * tile_px.y),
        )
    };
    let highlight = match app.state.selection() {
        Some(block) => block
            .first()
            .filter(|t| t.tileset_id == tileset.id)
            .map(|t| block_rect(t.x, t.y, block.width, block.height)),
        None => app
            .state
            .selected_tile()
            .filter(|t| t.tileset_id == tileset.id)
            .map(|t| block_rect(t.x, t.y, 1, 1)),
    };
    if let Some(highlight) = highlight {
        painter.rect_stroke(highlight, 0.0, Stroke::new(2.0, SELECTION_COLOR));
    }

    if !response.clicked() {
        return;
    }
    let Some(pos) = response.interact_pointer_pos() else {
        return;
    };
    let local: Vec2 = pos - rect.min;
    let x = (local.x / tile_px.x).floor().max(0.0) as u32;
    let y = (local.y / tile_px.y).floor().max(0.0) as u32;
    let shift = ui.input(|i| i.modifiers.shift);

    match app.palette_anchor {
        Some((id, ax, ay)) if shift && id == tileset.id => {
            if let Some(block) = TileSelection::from_tileset_rect(tileset, (ax, ay), (x, y)) {
                log::debug!("Selected {}x{} block from tileset {}", block.width, block.height, id);
                commands.push(Command::SelectBlock(block));
            }
        }
        _ => {
            app.palette_anchor = Some((tileset.id, x, y));
            commands.push(Command::SelectTile(tileset.tile_ref(x, y)));
        }
    }
}
