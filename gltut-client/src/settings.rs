//! Persistent settings.
//!
//! Settings live in `<config dir>/gltut/settings.json`. Every field is optional in the file;
//! missing fields fall back to [`Settings::default`].

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "gltut".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Requested OpenGL core profile version. Lessons may raise it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl GlVersion {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl Default for GlVersion {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

impl std::fmt::Display for GlVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    pub container: PathBuf,
    pub face: PathBuf,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            container: PathBuf::from("resources/container.png"),
            face: PathBuf::from("resources/awesomeface.png"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub gl_version: GlVersion,
    pub clear_color: [f32; 4],
    pub textures: TextureSettings,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            gl_version: GlVersion::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            textures: TextureSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// The default settings location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gltut").join("settings.json"))
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path).map_err(|source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| AppError::SettingsFormat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let io_error = |source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let data = serde_json::to_string_pretty(self).map_err(|source| {
            AppError::SettingsFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, data).map_err(io_error)
    }

    pub fn log_level(&self) -> Result<LevelFilter, AppError> {
        self.log_level
            .parse()
            .map_err(|_| AppError::LogLevel(self.log_level.clone()))
    }
}
