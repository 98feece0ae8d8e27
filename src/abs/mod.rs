//! This module contains the thin OpenGL wrappers the viewer is built on,
//! including application setup, shader management, mesh handling and textures.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
