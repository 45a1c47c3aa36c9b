//! Configuration system
//!
//! Any `serde` type can be loaded from and saved to `.toml` or `.ron` files
//! through the [`Config`] trait. [`PhysicsConfig`] holds the world-wide
//! simulation constants.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file, picking the format from the extension
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or has an extension other
    /// than `toml` or `ron`.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::of(path)?;
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, format)
    }

    /// Parse configuration text in the given format
    ///
    /// # Errors
    ///
    /// Fails when the text is not valid for the format.
    fn parse(contents: &str, format: Format) -> Result<Self, ConfigError> {
        match format {
            Format::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Render configuration text in the given format
    ///
    /// # Errors
    ///
    /// Fails when the value cannot be represented in the format.
    fn render(&self, format: Format) -> Result<String, ConfigError> {
        match format {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string())),
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Save configuration to file, picking the format from the extension
    ///
    /// # Errors
    ///
    /// Fails on an unsupported extension, a serialization failure or an IO
    /// error.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = self.render(Format::of(path)?)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// TOML
    Toml,
    /// Rusty Object Notation
    Ron,
}

impl Format {
    /// Pick the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for anything but `toml` and
    /// `ron`.
    pub fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// World-wide simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Acceleration applied to every dynamic body, scaled per body
    pub gravity: Vec2,

    /// Density of the surrounding air, scales quadratic drag
    pub air_density: f32,

    /// Distance within which [`crate::physics::PhysicsEngine::touching`]
    /// reports a neighbour
    pub touching_threshold: f32,

    /// Whether collisions transfer tangential friction
    pub friction_enabled: bool,

    /// Rounding slack of the sweep: shallower overlaps across the sweep axis
    /// and faces this far behind a leading side are ignored
    pub contact_tolerance: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::zeros(),
            air_density: 0.05,
            touching_threshold: 2.0,
            friction_enabled: true,
            contact_tolerance: 1e-3,
        }
    }
}

impl Config for PhysicsConfig {}
