use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "EDITABLE_CONFIG";

pub const DEFAULT_BLUR_COLOR: &str = "rgba(136, 136, 136, 0.3)";
pub const DEFAULT_FOCUS_COLOR: &str = "rgba(0,127,255,0.3)";
pub const DEFAULT_CARET_COLOR: &str = "#000";
pub const DEFAULT_CARET_WIDTH: f64 = 2.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// What happens when a range references a missing node or an offset
/// outside the node's bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyPolicy {
    /// Log the fault and hand it back to the caller as an error
    #[default]
    Report,
    /// Abort on the spot; meant for development builds
    Panic,
}

/// Colors and metrics used when drawing the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Highlight color while the editor does not have focus
    pub blur_color: String,
    /// Highlight color while the editor has focus
    pub focus_color: String,
    pub caret_color: String,
    pub caret_width: f64,
    pub consistency: ConsistencyPolicy,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            blur_color: DEFAULT_BLUR_COLOR.to_string(),
            focus_color: DEFAULT_FOCUS_COLOR.to_string(),
            caret_color: DEFAULT_CARET_COLOR.to_string(),
            caret_width: DEFAULT_CARET_WIDTH,
            consistency: ConsistencyPolicy::default(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionConfig,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    /// Location of the config file, honouring `EDITABLE_CONFIG` when set.
    pub fn config_path() -> PathBuf {
        if let Ok(overridden) = std::env::var(CONFIG_PATH_ENV) {
            let overridden = PathBuf::from(overridden);
            return Self::expand_path(&overridden).unwrap_or(overridden);
        }
        let config_dir = shellexpand::tilde("~/.config/editable");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
