mod editor_state;
mod persistence;
mod shared;

pub use editor_state::EditorState;
pub use persistence::{StoredLayer, StoredMap};
pub use shared::SharedEditor;
