//! Errors surfaced by the lesson runner.

use std::path::PathBuf;

use gltut_core::ShaderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error("SDL error: {0}")]
    Sdl(String),
    #[error("GPU error: {0}")]
    Gpu(String),
    #[error("failed to load texture {path}: {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("cannot access settings file {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    SettingsFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid log level `{0}`")]
    LogLevel(String),
    #[error("unknown lesson `{0}`, run with --list to see all lessons")]
    UnknownLesson(String),
    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
