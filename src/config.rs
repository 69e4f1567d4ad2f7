//! Configuration file handling.
//!
//! Settings come from `fringe-access.toml` (or `--config`); command-line
//! flags take precedence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::data::loader::ColumnNames;
use crate::figure::MapSettings;

pub const DEFAULT_CONFIG_FILE: &str = "fringe-access.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    /// Source column names.
    #[serde(default)]
    pub columns: ColumnNames,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub tooltip: TooltipConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Venue table to load at startup.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Map view and marker style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lon")]
    pub center_lon: f64,

    #[serde(default = "default_zoom")]
    pub zoom: f64,

    #[serde(default = "default_marker_size")]
    pub marker_size: f32,

    #[serde(default = "default_marker_opacity")]
    pub marker_opacity: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            marker_size: default_marker_size(),
            marker_opacity: default_marker_opacity(),
        }
    }
}

fn default_center_lat() -> f64 {
    MapSettings::default().center_lat
}

fn default_center_lon() -> f64 {
    MapSettings::default().center_lon
}

fn default_zoom() -> f64 {
    MapSettings::default().zoom
}

fn default_marker_size() -> f32 {
    MapSettings::default().marker_size
}

fn default_marker_opacity() -> f32 {
    MapSettings::default().marker_opacity
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TooltipConfig {
    /// Longest accessibility detail shown before truncating with `...`.
    #[serde(default = "default_detail_max_chars")]
    pub detail_max_chars: usize,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            detail_max_chars: default_detail_max_chars(),
        }
    }
}

fn default_detail_max_chars() -> usize {
    MapSettings::default().detail_max_chars
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Resolve the configuration for a run: explicit `--config`, else the
    /// default file if present, else built-in defaults. CLI values win.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::load_default()?.unwrap_or_default(),
        };
        config.merge_with_args(args);
        Ok(config)
    }

    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(path) = &args.data {
            self.data.path = Some(path.clone());
        }
    }

    pub fn map_settings(&self) -> MapSettings {
        MapSettings {
            center_lat: self.map.center_lat,
            center_lon: self.map.center_lon,
            zoom: self.map.zoom,
            marker_size: self.map.marker_size,
            marker_opacity: self.map.marker_opacity,
            detail_max_chars: self.tooltip.detail_max_chars,
        }
    }
}
