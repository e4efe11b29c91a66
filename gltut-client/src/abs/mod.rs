//! Thin wrappers over SDL2 and GL objects used by the lessons: the window and context, meshes
//! and textures. Shader programs come from `gltut_core`.

pub mod app;
pub mod mesh;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use texture::*;
