use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use crate::split::{Dp, SplitState, DEFAULT_BAR};
use crate::theme::Theme;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config path")]
    NoConfigPath,
    #[error("failed to write config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Initial settings for the split view. The ratio is only a starting point,
/// it is not written back when the user drags the divider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSettings {
    #[serde(default)]
    pub ratio: f32,
    #[serde(default = "default_bar")]
    pub bar_dp: f32,
    /// RGBA; the theme's separator color when unset.
    #[serde(default)]
    pub bar_color: Option<[u8; 4]>,
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            ratio: 0.0,
            bar_dp: default_bar(),
            bar_color: None,
        }
    }
}

fn default_bar() -> f32 {
    DEFAULT_BAR.0
}

impl SplitSettings {
    /// Build a split state from these settings.
    pub fn to_state(&self, id_source: impl std::hash::Hash, theme: Theme) -> SplitState {
        let color = match self.bar_color {
            Some([r, g, b, a]) => egui::Color32::from_rgba_unmultiplied(r, g, b, a),
            None => theme.bar_color(),
        };
        SplitState::new(id_source)
            .with_ratio(self.ratio)
            .with_bar(Dp(self.bar_dp))
            .with_bar_color(color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub split: SplitSettings,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_window")]
    pub window: [f32; 2],
}

fn default_window() -> [f32; 2] {
    [1000.0, 700.0]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            split: SplitSettings::default(),
            theme: Theme::default(),
            window: default_window(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.config/split-view/config.yaml)
    pub fn config_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            let mut path = PathBuf::from(home);
            path.push(".config");
            path.push("split-view");
            path.push("config.yaml");
            path
        })
    }

    /// Load config from file, falling back to defaults on any problem
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigPath)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Create an example config file
    pub fn create_example() -> Result<(), ConfigError> {
        let example = Config {
            split: SplitSettings {
                ratio: -0.4,
                bar_dp: 6.0,
                bar_color: Some([90, 90, 110, 255]),
            },
            theme: Theme::Dark,
            window: default_window(),
        };

        example.save()
    }
}
