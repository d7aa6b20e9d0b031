use thiserror::Error;

/// Errors raised by the map model, its encodings and the persistence boundary.
///
/// Out-of-bounds paint targets, fills without a selected tile and removing the
/// last layer are not errors; those operations simply leave the state unchanged.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Unknown topology: {0:?} (expected \"grid\" or \"hex\")")]
    UnknownTopology(String),

    #[error("Malformed tile reference: {0:?}")]
    MalformedTileRef(String),

    #[error("Layer index {index} out of range (layer count {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid map dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Layer '{name}' has {actual} but the map expects {expected}")]
    LayerSizeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("A map must contain at least one layer")]
    NoLayers,

    #[error("Invalid layer id: {0}")]
    InvalidLayerId(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
