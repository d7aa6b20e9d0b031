use tilemap_editor::config::EditorConfig;
use tilemap_editor::state::StoredMap;
use tilemap_editor::{
    CellPos, EditorError, EditorState, MapConfig, MapDocument, TileRef, ToolType, Topology,
};

fn painted_hex_map() -> EditorState {
    let config = MapConfig::new(Topology::Hex, 24, 3, 2).unwrap();
    let mut state = EditorState::with_document(MapDocument::new(config), &EditorConfig::default());
    state.select_tile(Some(TileRef::new(4, 1, 2)));
    state.paint(CellPos::new(2, 1));
    state.add_layer();
    state.rename_layer(1, "Props").unwrap();
    state.set_layer_visibility(1, false).unwrap();
    state.select_tile(Some(TileRef::new(0, 0, 0)));
    state.paint(CellPos::new(0, 0));
    state
}

fn stored(state: &EditorState) -> serde_json::Value {
    serde_json::from_str(&state.document().to_json().unwrap()).unwrap()
}

#[test]
fn map_survives_a_round_trip() {
    let state = painted_hex_map();
    let json = state.document().to_json().unwrap();
    let loaded = MapDocument::from_json(&json).unwrap();
    assert_eq!(&loaded, state.document());
}

#[test]
fn stored_shape_uses_encoded_tiles_and_null_for_empty() {
    let value = stored(&painted_hex_map());
    assert_eq!(value["topology"], "hex");
    assert_eq!(value["tileSize"], 24);
    assert_eq!(value["layers"][0]["tiles"][1][2], "4,1,2");
    assert!(value["layers"][0]["tiles"][0][0].is_null());
    assert_eq!(value["layers"][1]["visible"], false);
}

#[test]
fn file_round_trip() {
    let dir = std::env::temp_dir().join(format!("tilemap_editor_test_{}", std::process::id()));
    let path = dir.join("nested").join("map.json");
    let state = painted_hex_map();

    state.document().save_file(&path).unwrap();
    let loaded = MapDocument::load_file(&path).unwrap();
    assert_eq!(loaded.layers()[1].name, "Props");
    std::fs::remove_dir_all(&dir).unwrap();
}

fn reject(edit: impl FnOnce(&mut serde_json::Value)) -> EditorError {
    let mut value = stored(&painted_hex_map());
    edit(&mut value);
    MapDocument::from_json(&value.to_string()).unwrap_err()
}

#[test]
fn unknown_topology_is_rejected() {
    let err = reject(|v| v["topology"] = "triangle".into());
    assert!(matches!(err, EditorError::UnknownTopology(t) if t == "triangle"));
}

#[test]
fn malformed_tile_is_rejected() {
    let err = reject(|v| v["layers"][0]["tiles"][0][1] = "1,2".into());
    assert!(matches!(err, EditorError::MalformedTileRef(_)));
}

#[test]
fn wrong_layer_size_is_rejected() {
    let err = reject(|v| {
        v["layers"][1]["tiles"][0]
            .as_array_mut()
            .unwrap()
            .push(serde_json::Value::Null)
    });
    assert!(matches!(err, EditorError::LayerSizeMismatch { .. }));

    let err = reject(|v| v["height"] = 5.into());
    assert!(matches!(err, EditorError::LayerSizeMismatch { .. }));
}

#[test]
fn empty_layer_list_is_rejected() {
    let err = reject(|v| v["layers"] = serde_json::json!([]));
    assert!(matches!(err, EditorError::NoLayers));
}

#[test]
fn bad_and_duplicate_layer_ids_are_rejected() {
    let err = reject(|v| v["layers"][0]["id"] = "layer-1".into());
    assert!(matches!(err, EditorError::InvalidLayerId(_)));

    let err = reject(|v| {
        let first = v["layers"][0]["id"].clone();
        v["layers"][1]["id"] = first;
    });
    assert!(matches!(err, EditorError::InvalidLayerId(_)));
}

#[test]
fn non_positive_dimensions_are_rejected() {
    let err = reject(|v| v["tileSize"] = 0.into());
    assert!(matches!(err, EditorError::InvalidDimensions(_)));
}

#[test]
fn rejected_load_leaves_the_session_untouched() {
    let mut state = painted_hex_map();
    let before = state.snapshot();

    let mut broken: StoredMap = state.document().to_stored();
    broken.layers[0].tiles[0][0] = Some("x,y,z".into());
    let json = serde_json::to_string(&broken).unwrap();

    if let Ok(doc) = MapDocument::from_json(&json) {
        state.load_document(doc);
    }
    assert_eq!(state.document(), &before);
}

#[test]
fn loading_resets_the_session_view() {
    let mut state = painted_hex_map();
    state.set_tool(ToolType::Fill);
    state.set_cursor(Some(CellPos::new(1, 1)));

    let doc = MapDocument::new(MapConfig::default());
    state.load_document(doc);
    assert_eq!(state.active_layer_index(), 0);
    assert_eq!(state.cursor(), None);
    assert_eq!(state.document().width(), 20);
}
