//! Application configuration, read from TOML.
//!
//! ```toml
//! resource = "data/items.json"
//!
//! [surface]
//! cell_width = 8.0
//! cell_height = 16.0
//!
//! [renderer]
//! duration_ms = 500
//! reduced_motion = true
//! ```

use std::path::Path;

use arbor::{RendererConfig, Rgb};
use log::{debug, info};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::paths;

pub const DEFAULT_RESOURCE: &str = "data/items.json";

/// How logical surface units map onto terminal cells.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface units covered by one cell horizontally.
    pub cell_width: f64,
    /// Surface units covered by one cell vertically.
    pub cell_height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl SurfaceConfig {
    /// Cell metrics must be positive and finite for the canvas mapping to
    /// make sense.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "surface.{key} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
            margin_top: 20.0,
            margin_right: 90.0,
            margin_bottom: 30.0,
            margin_left: 90.0,
        }
    }
}

/// Colors of the terminal front end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub link: Rgb,
    pub node_stroke: Rgb,
    pub accent: Rgb,
    pub error: Rgb,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: Rgb::new(24, 24, 27),
            border: Rgb::new(82, 82, 91),
            text: Rgb::new(228, 228, 231),
            link: Rgb::GRAY,
            node_stroke: Rgb::STEEL_BLUE,
            accent: Rgb::new(255, 153, 51),
            error: Rgb::RED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// File path or `http(s)://` URL of the tree payload.
    pub resource: String,
    /// Redraw interval while something is animating, in milliseconds.
    pub tick_ms: u64,
    pub surface: SurfaceConfig,
    pub theme: ThemeConfig,
    pub renderer: RendererConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resource: DEFAULT_RESOURCE.to_string(),
            tick_ms: 16,
            surface: SurfaceConfig::default(),
            theme: ThemeConfig::default(),
            renderer: RendererConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.surface.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one the platform config file
    /// is used when present, and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                Self::load_from(path)
            }
            None => match paths::config_file() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        info!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
