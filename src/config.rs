//! Viewer configuration.
//!
//! Every field has a built-in default. A JSON file at `<config dir>/pyramid-viewer/config.json`
//! may override any subset of them.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "pyramid-viewer";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Pyramid Viewer".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    /// One image per face, in face order.
    pub textures: Vec<PathBuf>,
    pub clear_color: [f32; 4],
    pub log_level: LevelFilter,
    /// Also rotate on the initial key press, not only on key repeats.
    pub rotate_on_press: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            textures: (1..=5)
                .map(|i| PathBuf::from(format!("textures/sticker-{i}.png")))
                .collect(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            log_level: LevelFilter::Info,
            rotate_on_press: false,
        }
    }
}

impl Config {
    /// Path of the user config file, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads the user config, falling back to defaults when there is no config file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads the config at `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.textures.len(), crate::pyramid::FACES.len());
        assert_eq!(config.textures[4], PathBuf::from("textures/sticker-5.png"));
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(!config.rotate_on_press);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "window": { "title": "Test" }, "log_level": "debug", "rotate_on_press": true }"#,
        )
        .unwrap();
        assert_eq!(config.window.title, "Test");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert!(config.rotate_on_press);
        assert_eq!(config.textures, Config::default().textures);
    }

    #[test]
    fn test_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<Config>(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("pyramid-viewer-missing").join(CONFIG_FILE);
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("pyramid-viewer-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, "{ \"window\": 3 ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));

        fs::remove_dir_all(&dir).unwrap();
    }
}
