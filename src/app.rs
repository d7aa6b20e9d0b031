use eframe::egui;
use image::RgbaImage;
use std::collections::HashMap;

use crate::command::Command;
use crate::config::EditorConfig;
use crate::document::MapDocument;
use crate::error::{EditorError, EditorResult};
use crate::file_handler::{DroppedAsset, FileHandler};
use crate::geometry::Topology;
use crate::input::InputHandler;
use crate::panels::{central_panel, layers_panel, status_bar, tileset_panel, tools_panel};
use crate::renderer::{Renderer, TilesetTextures};
use crate::state::EditorState;
use crate::tileset::{Tileset, TilesetCatalog};

const CONFIG_KEY: &str = "tilemap_editor_config";
const MAP_KEY: &str = "tilemap_editor_map";

pub struct TileMapApp {
    pub(crate) config: EditorConfig,
    pub(crate) state: EditorState,
    pub(crate) catalog: TilesetCatalog,
    /// Decoded tileset pixels, kept for PNG export
    pub(crate) images: HashMap<u32, RgbaImage>,
    pub(crate) textures: TilesetTextures,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    file_handler: FileHandler,
    /// Pending values of the resize controls
    pub(crate) resize_to: [usize; 2],
    /// Pending values of the topology and tile size controls
    pub(crate) geometry_to: (Topology, u32),
    pub(crate) rename_buffer: String,
    /// First corner of a block selection in the palette: (tileset id, x, y)
    pub(crate) palette_anchor: Option<(u32, u32, u32)>,
    pub(crate) status: Option<String>,
}

impl Default for TileMapApp {
    fn default() -> Self {
        Self::with_state(EditorConfig::default(), None)
    }
}

impl TileMapApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let (config, document) = match cc.storage {
            Some(storage) => {
                let config: EditorConfig =
                    eframe::get_value(storage, CONFIG_KEY).unwrap_or_default();
                let document = storage
                    .get_string(MAP_KEY)
                    .and_then(|json| match MapDocument::from_json(&json) {
                        Ok(doc) => Some(doc),
                        Err(err) => {
                            log::warn!("Discarding stored map: {}", err);
                            None
                        }
                    });
                (config, document)
            }
            None => (EditorConfig::default(), None),
        };
        Self::with_state(config, document)
    }

    fn with_state(config: EditorConfig, document: Option<MapDocument>) -> Self {
        let state = match document {
            Some(doc) => EditorState::with_document(doc, &config),
            None => EditorState::new(&config),
        };
        let map = *state.document().config();
        Self {
            renderer: Renderer::new(config.show_grid),
            config,
            state,
            catalog: TilesetCatalog::new(),
            images: HashMap::new(),
            textures: TilesetTextures::default(),
            input: InputHandler::default(),
            file_handler: FileHandler::new(),
            resize_to: [map.width, map.height],
            geometry_to: (map.topology, map.tile_size),
            rename_buffer: String::new(),
            palette_anchor: None,
            status: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Runs a command, reporting failures in the status bar.
    pub fn execute(&mut self, command: Command) {
        if let Err(err) = command.execute(&mut self.state) {
            log::warn!("{:?} failed: {}", command, err);
            self.status = Some(err.to_string());
        }
    }

    pub fn new_map(&mut self) {
        self.load_document(MapDocument::new(self.config.new_map));
    }

    fn load_document(&mut self, document: MapDocument) {
        self.state.load_document(document);
        let map = *self.state.document().config();
        self.resize_to = [map.width, map.height];
        self.geometry_to = (map.topology, map.tile_size);
        self.status = None;
    }

    /// Slices `image` into a new tileset using the map's tile size.
    pub fn add_tileset(&mut self, ctx: &egui::Context, name: String, image: RgbaImage) -> EditorResult<u32> {
        let tile_size = self.state.document().config().tile_size;
        let grid_width = image.width() / tile_size;
        let grid_height = image.height() / tile_size;
        if grid_width == 0 || grid_height == 0 {
            return Err(EditorError::InvalidDimensions(format!(
                "{} is {}x{}, smaller than one {}px tile",
                name,
                image.width(),
                image.height(),
                tile_size
            )));
        }

        let id = self.catalog.iter().map(|t| t.id + 1).max().unwrap_or(0);
        let tileset = Tileset {
            id,
            name: name.clone(),
            image_url: name,
            tile_width: tile_size,
            tile_height: tile_size,
            grid_width,
            grid_height,
            owner: None,
            is_public: false,
            in_collection: true,
        };
        log::info!("Added tileset {} ({}x{} tiles)", id, grid_width, grid_height);
        self.textures.load(ctx, &tileset, &image);
        self.images.insert(id, image);
        self.catalog.insert(tileset);
        Ok(id)
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        for asset in self.file_handler.process_dropped_files() {
            match asset {
                DroppedAsset::TilesetImage { name, image } => {
                    if let Err(err) = self.add_tileset(ctx, name, image) {
                        log::warn!("Rejected tileset: {}", err);
                        self.status = Some(err.to_string());
                    }
                }
                DroppedAsset::Map(document) => self.load_document(document),
            }
        }
    }

    /// Writes `map.json` and `map.png` into the working directory.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_files(&mut self) {
        use crate::export::{export_json, export_png, ExportOptions};

        let options = ExportOptions::default();
        let result = export_json(&self.state, &options).and_then(|json| {
            std::fs::write("map.json", json)?;
            export_png(&self.state, &self.catalog, &self.images, &options).save("map.png")?;
            Ok(())
        });
        self.status = Some(match result {
            Ok(()) => "Exported map.json and map.png".to_owned(),
            Err(err) => {
                log::warn!("Export failed: {}", err);
                err.to_string()
            }
        });
    }
}

impl eframe::App for TileMapApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, &self.config);
        match self.state.document().to_json() {
            Ok(json) => storage.set_string(MAP_KEY, json),
            Err(err) => log::warn!("Failed to store map: {}", err),
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        layers_panel(self, ctx);
        tileset_panel(self, ctx);
        status_bar(self, ctx);
        central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
    }
}
