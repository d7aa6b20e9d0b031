use eframe::egui;

use crate::app::TileMapApp;
use crate::renderer::Renderer;

pub fn central_panel(app: &mut TileMapApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both()
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let size = Renderer::canvas_size(&app.state);
                let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());

                app.input.set_canvas_rect(response.rect);
                for event in app.input.process_input(ctx) {
                    if app.state.handle_input(&event) {
                        ctx.request_repaint();
                    }
                }

                app.renderer.render(
                    &painter,
                    response.rect.min,
                    &app.state,
                    &app.catalog,
                    &app.textures,
                );
            });
    });
}
