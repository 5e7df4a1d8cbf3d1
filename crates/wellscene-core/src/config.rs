use crate::color::Rgba;
use crate::edges::EdgePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Viewer background, RGB.
pub const BACKGROUND: Rgba = Rgba::WHITE;
/// Viewer window size in logical pixels.
pub const WINDOW_SIZE: [f32; 2] = [800.0, 700.0];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// What to do with an attitude outside azimuth [0, 360) / dip [0, 90].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttitudeMode {
    /// Use the values as given.
    #[default]
    Passthrough,
    /// Wrap azimuth and clamp dip.
    Clamp,
    /// Drop the observation.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscConfig {
    pub radius: f64,
    /// Polygon sides.
    pub resolution: usize,
    pub opacity: f64,
}

impl Default for DiscConfig {
    fn default() -> Self {
        Self {
            radius: 200.0,
            resolution: 40,
            opacity: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub width: f64,
    pub color: Rgba,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: Rgba::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellConfig {
    pub line_width: f64,
    pub color: Rgba,
    pub label_font_size: f32,
}

impl Default for WellConfig {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            color: Rgba::WELL_GRAY,
            label_font_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    pub policy: EdgePolicy,
    pub line_width: f64,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            policy: EdgePolicy::FirstPair,
            line_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompassConfig {
    pub size: f64,
    pub offset_factor: f64,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            size: 1000.0,
            offset_factor: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub attitude: AttitudeMode,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub disc: DiscConfig,
    pub lines: IndicatorConfig,
    pub wells: WellConfig,
    pub edges: EdgeConfig,
    pub compass: CompassConfig,
    pub validation: ValidationConfig,
}

impl SceneConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        if !(self.disc.radius > 0.0) {
            errors.push(format!("disc.radius must be > 0 (got {})", self.disc.radius));
        }
        if self.disc.resolution < 3 {
            errors.push(format!(
                "disc.resolution must be >= 3 (got {})",
                self.disc.resolution
            ));
        }
        if !(self.disc.opacity > 0.0 && self.disc.opacity <= 1.0) {
            errors.push(format!(
                "disc.opacity must be in (0, 1] (got {})",
                self.disc.opacity
            ));
        }
        for (name, width) in [
            ("lines.width", self.lines.width),
            ("wells.line_width", self.wells.line_width),
            ("edges.line_width", self.edges.line_width),
        ] {
            if !(width > 0.0) {
                errors.push(format!("{name} must be > 0 (got {width})"));
            }
        }
        if !(self.compass.size > 0.0) {
            errors.push(format!("compass.size must be > 0 (got {})", self.compass.size));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
