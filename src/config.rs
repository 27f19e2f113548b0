use std::path::{Path, PathBuf};

use tracing::warn;

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::ConfigError;
use crate::rules::{MAX_CHAIN_DEPTH, WIN_LENGTH};

/// Default location of the settings file
pub const CONFIG_PATH: &str = "gomoku.toml";

/// Board geometry used for rendering and input.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    /// Pixel size of one cell
    pub cell_size: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cell_size: 32.0,
        }
    }
}

/// Automated opponent tuning.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Recursion cap for chain walking and the advisor search
    pub max_depth: u32,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_CHAIN_DEPTH,
            seed: None,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardConfig,
    pub advisor: AdvisorConfig,
    /// JSON file backing the key-value store
    pub storage_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            board: BoardConfig::default(),
            advisor: AdvisorConfig::default(),
            storage_path: PathBuf::from("gomoku-state.json"),
        }
    }
}

impl Settings {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width <= 0 {
            return Err(ConfigError::Validation("board.width must be > 0".into()));
        }
        if self.board.height <= 0 {
            return Err(ConfigError::Validation("board.height must be > 0".into()));
        }
        if self.board.cell_size.is_nan() || self.board.cell_size < 8.0 {
            return Err(ConfigError::Validation(
                "board.cell_size must be >= 8".into(),
            ));
        }
        // A scan reaches at most 2 + max_depth cells.
        if (self.advisor.max_depth as usize) + 2 < WIN_LENGTH {
            return Err(ConfigError::Validation(format!(
                "advisor.max_depth must be >= {}",
                WIN_LENGTH - 2
            )));
        }
        if self.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage_path must not be empty".into(),
            ));
        }
        Ok(())
    }
}
