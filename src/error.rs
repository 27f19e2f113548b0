use std::path::PathBuf;

/// Errors raised by the game core.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("cell ({x}, {y}) is already occupied")]
    Occupied { x: i32, y: i32 },

    #[error("cell ({x}, {y}) is outside the playable area")]
    OutOfBounds { x: i32, y: i32 },

    #[error("advisor found no free cell around ({x}, {y})")]
    AdvisorExhausted { x: i32, y: i32 },

    #[error("failed to decode board snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
