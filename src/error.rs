//! Error types for the game.
//!
//! Fallible operations return `GameResult<T>`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A map or asset file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The map file is not valid Tiled JSON.
    #[error("malformed map: {0}")]
    MapFormat(#[from] serde_json::Error),

    /// The background image referenced by the map could not be decoded.
    #[error("failed to load background image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A platform carried a type tag other than f/c/l/r.
    #[error("unknown surface type tag {0:?}")]
    UnknownSurfaceType(String),

    /// Window or presentation surface setup failed.
    #[error("window error: {0}")]
    Window(String),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

pub type GameResult<T> = Result<T, GameError>;
