use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Color;
use crate::error::{HistoryError, Result};

/// Shortest short id accepted, anything below collides too easily
pub const MIN_SHORT_ID_LEN: usize = 4;
/// Length of a full SHA-1 commit id
pub const MAX_SHORT_ID_LEN: usize = 40;

/// Settings for the build/attribute/colorize pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of leading hex digits used as the graph key
    pub short_id_len: usize,
    pub palette: PaletteConfig,
}

/// Parameters of the evenly spaced hue palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Hue of the first color, as a fraction of the color wheel
    pub hue_offset: f64,
    pub lightness: f64,
    pub saturation: f64,
    /// Color for commits no branch reaches
    pub unassigned: Color,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            short_id_len: 7,
            palette: PaletteConfig::default(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            hue_offset: 0.01,
            lightness: 0.6,
            saturation: 0.65,
            unassigned: Color::UNASSIGNED,
        }
    }
}

impl HistoryConfig {
    /// Parse and validate a TOML document; missing keys take their defaults
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| HistoryError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HistoryError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_SHORT_ID_LEN..=MAX_SHORT_ID_LEN).contains(&self.short_id_len) {
            return Err(HistoryError::InvalidConfig(format!(
                "short_id_len must be between {} and {}, got {}",
                MIN_SHORT_ID_LEN, MAX_SHORT_ID_LEN, self.short_id_len
            )));
        }
        self.palette.validate()
    }
}

impl PaletteConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("hue_offset", self.hue_offset),
            ("lightness", self.lightness),
            ("saturation", self.saturation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(HistoryError::InvalidConfig(format!(
                    "palette.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
