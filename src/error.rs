//! Error taxonomy
//!
//! Only startup can fail: sprite loading, texture upload and settings parsing.
//! The simulation itself is infallible in-memory arithmetic.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Sprite image is not present in the asset source
    #[error("asset not found: {0}")]
    AssetNotFound(String),

    /// Sprite image exists but could not be decoded
    #[error("failed to decode asset {name}: {source}")]
    AssetDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// The rendering engine refused the texture
    #[error("texture upload failed for {name}: {reason}")]
    TextureUpload { name: String, reason: String },

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
