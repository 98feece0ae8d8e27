//! Errors that abort startup.

use thiserror::Error;

use crate::config::ConfigError;

/// A fatal initialization failure. Any of these ends the process with exit code `-1`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to initialize SDL: {0}")]
    Sdl(String),
    #[error("failed to create window: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("failed to create OpenGL context: {0}")]
    Context(String),
    #[error("failed to build shader program: {0}")]
    Shader(String),
    #[error("failed to upload geometry: {0}")]
    Mesh(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
