use tilemap_editor::command::Command;
use tilemap_editor::config::EditorConfig;
use tilemap_editor::{
    CellPos, EditorError, EditorState, MapConfig, MapDocument, TileRef, Topology,
};

fn session(width: usize, height: usize) -> EditorState {
    let config = MapConfig::new(Topology::Grid, 16, width, height).unwrap();
    EditorState::with_document(MapDocument::new(config), &EditorConfig::default())
}

#[test]
fn new_map_starts_with_one_empty_layer() {
    let state = session(3, 2);
    let doc = state.document();
    assert_eq!(doc.layer_count(), 1);
    assert_eq!(doc.layers()[0].name, "Layer 1");
    assert!(doc.layers()[0].visible);
    assert_eq!(doc.layers()[0].tiles().rows(), vec![vec![None; 3]; 2]);
}

#[test]
fn resize_keeps_overlapping_cells() {
    let mut state = session(4, 4);
    state.select_tile(Some(TileRef::new(0, 1, 0)));
    state.paint(CellPos::new(1, 1));
    state.paint(CellPos::new(3, 3));
    state.add_layer();
    state.paint(CellPos::new(0, 0));

    state.resize_map(2, 2).unwrap();
    let doc = state.document();
    assert_eq!((doc.width(), doc.height()), (2, 2));
    let bottom = doc.layers()[0].tiles();
    assert_eq!(bottom.filled_count(), 1);
    assert!(bottom.get(CellPos::new(1, 1)).is_some());
    assert_eq!(doc.layers()[1].width(), 2);

    state.resize_map(6, 6).unwrap();
    let bottom = state.document().layers()[0].tiles();
    assert_eq!((bottom.width(), bottom.height()), (6, 6));
    assert!(bottom.get(CellPos::new(1, 1)).is_some());
    assert_eq!(bottom.get(CellPos::new(3, 3)), None);
    assert_eq!(bottom.filled_count(), 1);
}

#[test]
fn invalid_resize_changes_nothing() {
    let mut state = session(4, 3);
    let err = state.resize_map(0, 5).unwrap_err();
    assert!(matches!(err, EditorError::InvalidDimensions(_)));
    assert_eq!((state.document().width(), state.document().height()), (4, 3));
}

#[test]
fn oversized_resize_is_rejected() {
    let mut state = session(4, 3);
    state.select_tile(Some(TileRef::new(0, 0, 0)));
    state.paint(CellPos::new(2, 2));
    let before = state.snapshot();

    for (width, height) in [(usize::MAX / 2, 3), (3, usize::MAX), (i32::MAX as usize + 1, 1)] {
        let err = state.resize_map(width, height).unwrap_err();
        assert!(matches!(err, EditorError::InvalidDimensions(_)), "{width}x{height}");
    }
    assert_eq!(state.document(), &before);
    assert!(MapConfig::new(Topology::Grid, 16, usize::MAX, 2).is_err());
}

#[test]
fn resize_clears_a_cursor_that_falls_off_the_map() {
    let mut state = session(4, 4);
    state.set_cursor(Some(CellPos::new(3, 3)));
    state.resize_map(2, 2).unwrap();
    assert_eq!(state.cursor(), None);
}

#[test]
fn added_layers_are_named_by_position_and_become_active() {
    let mut state = session(2, 2);
    assert_eq!(state.add_layer(), 1);
    assert_eq!(state.add_layer(), 2);
    assert_eq!(state.active_layer_index(), 2);
    assert_eq!(state.active_layer().name, "Layer 3");
    assert_eq!(state.document().layers()[1].name, "Layer 2");
}

#[test]
fn removing_the_only_layer_is_a_no_op() {
    let mut state = session(2, 2);
    let id = state.active_layer().id;
    assert!(!state.remove_layer(0).unwrap());
    assert_eq!(state.document().layer_count(), 1);
    assert_eq!(state.active_layer().id, id);
}

#[test]
fn removing_the_top_layer_clamps_the_active_index() {
    let mut state = session(2, 2);
    state.add_layer();
    state.add_layer();
    assert!(state.remove_layer(2).unwrap());
    assert_eq!(state.active_layer_index(), 1);
    assert_eq!(state.document().layer_count(), 2);
}

#[test]
fn bad_layer_indices_are_rejected() {
    let mut state = session(2, 2);
    assert!(matches!(
        state.rename_layer(5, "nope"),
        Err(EditorError::IndexOutOfRange { index: 5, len: 1 })
    ));
    assert!(state.set_active_layer(1).is_err());
    assert!(state.remove_layer(1).is_err());
    assert_eq!(state.active_layer_index(), 0);
}

#[test]
fn moving_layers_keeps_the_active_layer_selected() {
    let mut state = session(2, 2);
    state.add_layer();
    state.add_layer();
    let active = state.active_layer().id;

    state.move_layer(2, 0).unwrap();
    assert_eq!(state.active_layer_index(), 0);
    assert_eq!(state.active_layer().id, active);
    assert_eq!(state.document().layers()[1].name, "Layer 1");
}

#[test]
fn painting_only_touches_the_active_layer() {
    let mut state = session(3, 3);
    state.add_layer();
    state.select_tile(Some(TileRef::new(0, 0, 0)));
    state.paint(CellPos::new(1, 1));

    assert_eq!(state.document().layers()[0].tiles().filled_count(), 0);
    assert_eq!(state.document().layers()[1].tiles().filled_count(), 1);
}

#[test]
fn commands_drive_the_layer_panel() {
    let mut state = session(3, 3);
    for command in [
        Command::AddLayer,
        Command::RenameLayer {
            index: 1,
            name: "Decor".into(),
        },
        Command::ToggleLayerVisibility { index: 0 },
        Command::SelectLayer { index: 0 },
    ] {
        command.execute(&mut state).unwrap();
    }

    let doc = state.document();
    assert_eq!(doc.layers()[1].name, "Decor");
    assert!(!doc.layers()[0].visible);
    assert_eq!(state.active_layer_index(), 0);
    assert!(Command::RemoveLayer { index: 7 }.execute(&mut state).is_err());
}

#[test]
fn removing_below_the_active_layer_keeps_a_valid_index() {
    let mut state = session(2, 2);
    state.add_layer();
    state.add_layer();
    assert_eq!(state.active_layer_index(), 2);

    assert!(state.remove_layer(0).unwrap());
    assert_eq!(state.active_layer_index(), 1);
    assert_eq!(state.active_layer().name, "Layer 3");
    assert_eq!(state.document().layer_count(), 2);
}

#[test]
fn removing_around_a_middle_active_layer() {
    let mut state = session(2, 2);
    state.add_layer();
    state.add_layer();
    state.add_layer();
    state.set_active_layer(1).unwrap();

    // above the active layer: nothing to clamp
    assert!(state.remove_layer(3).unwrap());
    assert_eq!(state.active_layer_index(), 1);
    assert_eq!(state.active_layer().name, "Layer 2");

    // below it: the index stays in range
    assert!(state.remove_layer(0).unwrap());
    assert_eq!(state.active_layer_index(), 1);
    assert_eq!(state.active_layer().name, "Layer 3");

    // the active layer itself, now the top one
    assert!(state.remove_layer(1).unwrap());
    assert_eq!(state.active_layer_index(), 0);
    assert_eq!(state.active_layer().name, "Layer 2");
}
