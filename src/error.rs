//! Error types
//!
//! Only construction and file loading can fail. Per-frame simulation is total.

use std::path::PathBuf;

/// A loaded scene (or the tuning it runs with) is missing something the game
/// cannot run without.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("required transform not found: {0}")]
    MissingTransform(String),
    #[error("level has no {0} collider")]
    MissingCollider(&'static str),
    #[error("switch {0:?} has no plate to control")]
    UnpairedSwitch(String),
    #[error("player source mesh is empty")]
    EmptyMesh,
    #[error("cannot start with this tuning: {0}")]
    Tuning(#[from] ConfigError),
}

/// Tuning or settings could not be read, or hold values the game cannot run with.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}
