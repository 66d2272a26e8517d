use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// `enter` was given an empty name or one with no registered scene.
    #[error("scene '{name}' is not registered")]
    SceneNotFound { name: String },

    #[error("sprite '{0}' is not registered")]
    SpriteNotFound(String),

    /// A manifest line did not read `name x y w h`. `line` is 1-based.
    #[error("manifest line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("failed to load resource '{name}' from '{url}': {reason}")]
    ResourceLoad {
        name: String,
        url: String,
        reason: String,
    },
}
