use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Catalog file locations
    pub paths: PathsConfig,

    /// UI behaviour
    pub ui: UiConfig,
}

/// Catalog file locations
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PathsConfig {
    /// Base directory holding the game files and both text files
    pub base_dir: PathBuf,

    /// Catalog file name, relative to the base directory
    pub catalog_file: String,

    /// Favorites file name, relative to the base directory
    pub favorites_file: String,
}

/// UI behaviour
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UiConfig {
    /// Quiesce window for free-text filtering, in milliseconds
    pub filter_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
                catalog_file: "cross_referenced_games.txt".to_string(),
                favorites_file: "favorites.txt".to_string(),
            },
            ui: UiConfig {
                filter_debounce_ms: 300,
            },
        }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mini-games-hub")
            .join("config.toml")
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&config_str)?;

        info!("Configuration loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string(self)?;
        fs::write(&config_path, config_str)?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }

    /// Full path to the catalog file
    pub fn catalog_path(&self) -> PathBuf {
        self.paths.base_dir.join(&self.paths.catalog_file)
    }

    /// Full path to the favorites file
    pub fn favorites_path(&self) -> PathBuf {
        self.paths.base_dir.join(&self.paths.favorites_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_standard_file_names() {
        let config = Config::default();
        assert_eq!(config.paths.catalog_file, "cross_referenced_games.txt");
        assert_eq!(config.paths.favorites_file, "favorites.txt");
        assert_eq!(config.ui.filter_debounce_ms, 300);
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config, parsed);
    }
}
