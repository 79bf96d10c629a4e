//! # Engine Configuration
//!
//! Configuration types for the engine core, plus a small trait that loads
//! and saves any serde-derived config from TOML or RON files. The format is
//! chosen from the file extension so applications can keep hand-edited TOML
//! next to tool-generated RON.

use serde::{Deserialize, Serialize};

/// Configuration trait for serde-derived settings types
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error reading or writing the config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error in the config file contents
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error while writing
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// File extension is neither `.toml` nor `.ron`
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level engine configuration
///
/// Carries the settings the world orchestrator needs before any world is
/// loaded: which map to load first, whether gameplay (as opposed to
/// editor-only inspection) is active, and where world files live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Map file loaded by `World::init`
    pub starting_map: String,

    /// Whether the actor wake cascade runs at world start
    ///
    /// Editor sessions leave this off so actors stay inert while inspected.
    pub gameplay_on: bool,

    /// Prefer save-game files over authored map files when loading
    pub use_game_saves: bool,

    /// Directory holding authored world files
    pub world_dir: String,

    /// Directory holding player save files
    pub save_dir: String,

    /// File extension appended when saving in-game world state
    pub save_extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_map: "default.ron".to_string(),
            gameplay_on: true,
            use_game_saves: false,
            world_dir: "worlds".to_string(),
            save_dir: "saves".to_string(),
            save_extension: "sav".to_string(),
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Resolve a world name against the configured world or save directory
    pub fn world_path(&self, world_name: &str) -> String {
        if self.use_game_saves {
            format!("{}/{}", self.save_dir, world_name)
        } else {
            format!("{}/{}", self.world_dir, world_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.gameplay_on);
        assert!(!config.use_game_saves);
        assert_eq!(config.starting_map, "default.ron");
    }

    #[test]
    fn test_world_path_resolution() {
        let mut config = EngineConfig::default();
        assert_eq!(config.world_path("level1.ron"), "worlds/level1.ron");

        config.use_game_saves = true;
        assert_eq!(config.world_path("level1.sav"), "saves/level1.sav");
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let err = EngineConfig::default()
            .save_to_file("engine.yaml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
