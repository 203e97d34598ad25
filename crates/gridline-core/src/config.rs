//! TOML-based application preferences.
//!
//! Persists the measurement preferences that seed a fresh session: which
//! units are selected, where the origin sits, whether the Y axis is inverted,
//! and which save-format version documents are written at. Stored at the
//! platform-appropriate location:
//!
//! - Windows: `%APPDATA%\Gridline\config.toml`
//! - Linux:   `$XDG_CONFIG_HOME/gridline/config.toml` (or `~/.config/...`)
//! - macOS:   `~/Library/Application Support/Gridline/config.toml`
//!
//! Every field carries a serde default so first runs and configs written by
//! older releases load cleanly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::FORMAT_VERSION;
use crate::geometry::FPoint;
use crate::units::{AngularUnitsId, LinearUnitsId, UnitsSystem};

/// Error type for preference-file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Preference schema ─────────────────────────────────────────────────────────

/// Top-level application preferences stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ToolConfig {
    #[serde(default)]
    pub units: UnitsPrefs,
    #[serde(default)]
    pub document: DocumentPrefs,
}

/// Units and coordinate-policy preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitsPrefs {
    /// Linear units selected on startup.
    #[serde(default = "default_linear")]
    pub linear: LinearUnitsId,
    /// Angular units selected on startup.
    #[serde(default = "default_angular")]
    pub angular: AngularUnitsId,
    /// Whether the Y axis grows upward from the origin.
    #[serde(default)]
    pub invert_y: bool,
    /// Origin X offset, in the selected linear units.
    #[serde(default)]
    pub origin_x: f64,
    /// Origin Y offset, in the selected linear units.
    #[serde(default)]
    pub origin_y: f64,
}

/// Save-document preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentPrefs {
    /// Format version new documents are written at.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_linear() -> LinearUnitsId {
    LinearUnitsId::Pixels
}
fn default_angular() -> AngularUnitsId {
    AngularUnitsId::Degrees
}
fn default_format_version() -> u32 {
    FORMAT_VERSION
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for UnitsPrefs {
    fn default() -> Self {
        Self {
            linear: default_linear(),
            angular: default_angular(),
            invert_y: false,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

impl Default for DocumentPrefs {
    fn default() -> Self {
        Self {
            format_version: default_format_version(),
            log_level: default_log_level(),
        }
    }
}

impl ToolConfig {
    /// Builds a [`UnitsSystem`] seeded with these preferences.
    pub fn units_system(&self) -> UnitsSystem {
        let mut sys = UnitsSystem::new();
        sys.set_linear_units(self.units.linear);
        sys.set_angular_units(self.units.angular);
        sys.set_origin(FPoint::new(self.units.origin_x, self.units.origin_y));
        sys.set_invert_y(self.units.invert_y);
        sys
    }

    /// Loads preferences from `path`, returning defaults if the file does not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system errors other than "not
    /// found", and [`ConfigError::Parse`] if the TOML is malformed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Persists these preferences to `path`, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system failures or
    /// [`ConfigError::Serialize`] if serialization fails.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolves the platform-appropriate path of the preference file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Gridline"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Gridline")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
            .map(|base| base.join("gridline"))
    }
}
