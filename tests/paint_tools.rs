use tilemap_editor::config::EditorConfig;
use tilemap_editor::{
    CellPos, EditorState, MapConfig, MapDocument, TileRef, TileSelection, Tileset, ToolType,
    Topology,
};

// Helper to create a session on an empty map with one layer
fn session(width: usize, height: usize) -> EditorState {
    let config = MapConfig::new(Topology::Grid, 32, width, height).unwrap();
    EditorState::with_document(MapDocument::new(config), &EditorConfig::default())
}

fn filled(state: &EditorState) -> usize {
    state.active_layer().tiles().filled_count()
}

#[test]
fn small_brush_paints_exactly_one_cell() {
    let mut state = session(5, 5);
    let tile = TileRef::new(1, 2, 3);
    state.select_tile(Some(tile));

    assert!(state.paint(CellPos::new(2, 2)));
    assert_eq!(filled(&state), 1);
    assert_eq!(state.active_layer().tiles().get(CellPos::new(2, 2)), Some(tile));
}

#[test]
fn large_brush_is_clipped_at_the_corner() {
    let mut state = session(5, 5);
    state.set_tool(ToolType::LargeBrush);
    state.select_tile(Some(TileRef::new(0, 0, 0)));

    assert!(state.paint(CellPos::new(0, 0)));
    let tiles = state.active_layer().tiles();
    assert_eq!(tiles.filled_count(), 4);
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert!(tiles.get(CellPos::new(x, y)).is_some(), "({x}, {y}) not painted");
    }
}

#[test]
fn fill_covers_an_empty_map_and_is_then_a_no_op() {
    let mut state = session(5, 5);
    state.set_tool(ToolType::Fill);
    state.select_tile(Some(TileRef::new(1, 2, 3)));

    assert!(state.paint(CellPos::new(2, 2)));
    assert_eq!(filled(&state), 25);
    assert!(!state.paint(CellPos::new(0, 4)));
}

#[test]
fn fill_stops_at_different_tiles() {
    let mut state = session(5, 5);
    let wall = TileRef::new(0, 1, 0);
    let floor = TileRef::new(0, 2, 0);

    state.select_tile(Some(wall));
    for y in 0..5 {
        state.paint(CellPos::new(2, y));
    }
    state.set_tool(ToolType::Fill);
    state.select_tile(Some(floor));
    state.paint(CellPos::new(0, 0));

    let tiles = state.active_layer().tiles();
    let floors = tiles.iter_tiles().filter(|(_, t)| *t == floor).count();
    assert_eq!(floors, 10);
    assert_eq!(tiles.get(CellPos::new(3, 0)), None);
    assert_eq!(tiles.get(CellPos::new(2, 4)), Some(wall));
}

#[test]
fn fill_handles_large_maps() {
    let mut state = session(300, 300);
    state.set_tool(ToolType::Fill);
    state.select_tile(Some(TileRef::new(0, 0, 0)));

    assert!(state.paint(CellPos::new(150, 150)));
    assert_eq!(filled(&state), 300 * 300);
}

#[test]
fn eraser_clears_and_repeats_as_no_op() {
    let mut state = session(4, 4);
    state.select_tile(Some(TileRef::new(0, 0, 0)));
    state.paint(CellPos::new(1, 1));

    state.set_tool(ToolType::Eraser);
    assert!(state.paint(CellPos::new(1, 1)));
    assert_eq!(filled(&state), 0);
    assert!(!state.paint(CellPos::new(1, 1)));
}

#[test]
fn eraser_works_without_a_selected_tile() {
    let mut state = session(4, 4);
    state.select_tile(Some(TileRef::new(0, 0, 0)));
    state.paint(CellPos::new(0, 0));
    state.select_tile(None);

    state.set_tool(ToolType::Brush);
    assert!(!state.paint(CellPos::new(1, 0)));
    state.set_tool(ToolType::Eraser);
    assert!(state.paint(CellPos::new(0, 0)));
}

#[test]
fn off_map_targets_change_nothing() {
    let mut state = session(4, 4);
    state.select_tile(Some(TileRef::new(0, 0, 0)));

    for tool in ToolType::ALL {
        state.set_tool(tool);
        assert!(!state.paint(CellPos::new(-1, 0)), "{:?}", tool);
        assert!(!state.paint(CellPos::new(4, 4)), "{:?}", tool);
    }
    assert_eq!(filled(&state), 0);
}

#[test]
fn earlier_snapshots_are_not_affected_by_painting() {
    let mut state = session(4, 4);
    state.select_tile(Some(TileRef::new(0, 0, 0)));
    state.paint(CellPos::new(0, 0));

    let before = state.snapshot();
    state.paint(CellPos::new(1, 1));
    state.set_tool(ToolType::Eraser);
    state.paint(CellPos::new(0, 0));

    let old = before.layers()[0].tiles();
    assert_eq!(old.filled_count(), 1);
    assert!(old.get(CellPos::new(0, 0)).is_some());
    assert_eq!(filled(&state), 1);
}

#[test]
fn stamp_places_a_block_clipped_to_the_map() {
    let tileset = Tileset {
        id: 3,
        name: "dungeon".into(),
        image_url: "dungeon.png".into(),
        tile_width: 32,
        tile_height: 32,
        grid_width: 4,
        grid_height: 4,
        owner: None,
        is_public: true,
        in_collection: true,
    };
    let mut state = session(4, 4);
    state.set_tool(ToolType::Stamp);
    state.select_block(TileSelection::from_tileset_rect(&tileset, (0, 0), (1, 1)).unwrap());

    assert!(state.paint(CellPos::new(1, 1)));
    assert_eq!(filled(&state), 4);
    let tiles = state.active_layer().tiles_arc();
    assert_eq!(tiles.get(CellPos::new(2, 2)), Some(TileRef::new(3, 1, 1)));

    assert!(state.paint(CellPos::new(3, 3)));
    assert_eq!(tiles.get(CellPos::new(3, 3)), None);
    assert_eq!(
        state.active_layer().tiles().get(CellPos::new(3, 3)),
        Some(TileRef::new(3, 0, 0))
    );
}
