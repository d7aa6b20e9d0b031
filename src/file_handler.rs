use eframe::egui;
use image::RgbaImage;

use crate::document::MapDocument;
use crate::error::EditorResult;
use crate::tileset::decode_tileset_image;

/// What a dropped file turned out to be.
#[derive(Debug)]
pub enum DroppedAsset {
    /// An image to slice into a new tileset
    TilesetImage { name: String, image: RgbaImage },
    /// A saved map
    Map(MapDocument),
}

fn is_image(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

fn file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn file_bytes(file: &egui::DroppedFile) -> EditorResult<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Ok(bytes.to_vec());
    }
    match &file.path {
        Some(path) => Ok(std::fs::read(path)?),
        None => Ok(Vec::new()),
    }
}

/// Classifies a dropped file. `Ok(None)` means the file type is not handled.
pub fn read_dropped_file(name: &str, bytes: &[u8]) -> EditorResult<Option<DroppedAsset>> {
    if is_image(name) {
        let image = decode_tileset_image(bytes)?;
        return Ok(Some(DroppedAsset::TilesetImage {
            name: name.to_owned(),
            image,
        }));
    }
    if name.to_ascii_lowercase().ends_with(".json") {
        let json = String::from_utf8_lossy(bytes);
        return Ok(Some(DroppedAsset::Map(MapDocument::from_json(&json)?)));
    }
    Ok(None)
}

#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up newly dropped files. Returns true if there are files to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Reads and classifies the pending files. Files that fail to read are
    /// logged and skipped.
    pub fn process_dropped_files(&mut self) -> Vec<DroppedAsset> {
        let mut assets = Vec::new();
        for file in self.dropped_files.drain(..) {
            let name = file_name(&file);
            let result = file_bytes(&file).and_then(|bytes| read_dropped_file(&name, &bytes));
            match result {
                Ok(Some(asset)) => {
                    log::info!("Loaded dropped file: {}", name);
                    assets.push(asset);
                }
                Ok(None) => log::info!("Ignoring unsupported file: {}", name),
                Err(err) => log::warn!("Failed to load dropped file {}: {}", name, err),
            }
        }
        assets
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Drop tileset images or a map file:\n".to_owned();
            for file in &i.raw.hovered_files {
                match &file.path {
                    Some(path) => text += &format!("\n{}", path.display()),
                    None => text += "\n(Path not available)",
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}
