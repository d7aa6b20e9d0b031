use parking_lot::Mutex;
use std::sync::Arc;

use super::EditorState;
use crate::document::MapDocument;

/// An editing session that several threads can reach.
///
/// All mutations of one open map go through this single lock, so two paint
/// operations can never interleave. Readers that only need to look at the
/// map take a [`snapshot`](Self::snapshot) and release the lock right away.
#[derive(Debug, Clone)]
pub struct SharedEditor {
    inner: Arc<Mutex<EditorState>>,
}

impl SharedEditor {
    pub fn new(state: EditorState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Runs `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut EditorState) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn snapshot(&self) -> MapDocument {
        self.inner.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CellPos;
    use crate::tile::TileRef;
    use std::thread;

    #[test]
    fn concurrent_paints_are_serialized() {
        let shared = SharedEditor::new(EditorState::default());
        shared.with(|s| s.select_tile(Some(TileRef::new(0, 0, 0))));

        let handles: Vec<_> = (0..4)
            .map(|row| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for x in 0..10 {
                        shared.with(|s| s.paint(CellPos::new(x, row)));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let doc = shared.snapshot();
        assert_eq!(doc.layers()[0].tiles().filled_count(), 40);
    }
}
