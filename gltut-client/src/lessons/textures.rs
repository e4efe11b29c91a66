//! Textured rectangles, with one texture or two mixed together.

use std::path::Path;

use gltut_core::ShaderProgram;
use image::RgbaImage;

use super::{Frame, Lesson, LessonContext};
use crate::{
    abs::{Mesh, Texture, checkerboard},
    error::AppError,
    render::{QUAD, QUAD_INDICES},
    settings::TextureSettings,
};

/// Stand-in for the container image.
pub fn container_fallback() -> RgbaImage {
    checkerboard(256, 32, [150, 100, 50, 255], [110, 70, 30, 255])
}

/// Stand-in for the face image, transparent cells let the first texture through.
pub fn face_fallback() -> RgbaImage {
    checkerboard(256, 64, [255, 220, 0, 255], [0, 0, 0, 0])
}

/// Image paths and fallbacks of the first `units` texture units, container first.
pub fn texture_sources(
    textures: &TextureSettings,
    units: usize,
) -> Vec<(&Path, fn() -> RgbaImage)> {
    let sources: [(&Path, fn() -> RgbaImage); 2] = [
        (textures.container.as_path(), container_fallback),
        (textures.face.as_path(), face_fallback),
    ];
    sources.into_iter().take(units).collect()
}

/// Loads the textures of the first `units` texture units named in the settings.
pub fn load_textures(ctx: &LessonContext, units: usize) -> Result<Vec<Texture>, AppError> {
    texture_sources(&ctx.settings.textures, units)
        .into_iter()
        .map(|(path, fallback)| {
            let texture = Texture::load_or(ctx.gl, path, fallback())?;
            log::debug!(
                "Texture {}: {}x{}",
                path.display(),
                texture.width(),
                texture.height()
            );
            Ok(texture)
        })
        .collect()
}

/// A quad sampling its textures on consecutive texture units.
pub struct Textured {
    mesh: Mesh,
    program: ShaderProgram,
    textures: Vec<Texture>,
}

impl Textured {
    fn new(program: ShaderProgram, mesh: Mesh, textures: Vec<Texture>) -> Result<Self, AppError> {
        for unit in 0..textures.len() {
            program.set_uniform(&format!("texture{unit}"), unit as i32)?;
        }
        Ok(Self {
            mesh,
            program,
            textures,
        })
    }

    pub fn build_single(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
        let program = crate::shader_program!(ctx.gl, "textured")?;
        let mesh = Mesh::new(ctx.gl, &program, &QUAD, &QUAD_INDICES, glow::TRIANGLES)?;
        let textures = load_textures(ctx, 1)?;
        Ok(Box::new(Self::new(program, mesh, textures)?))
    }

    pub fn build_mixed(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
        let program = crate::shader_program!(ctx.gl, "textured_mix")?;
        let mesh = Mesh::new(ctx.gl, &program, &QUAD, &QUAD_INDICES, glow::TRIANGLES)?;
        let textures = load_textures(ctx, 2)?;
        Ok(Box::new(Self::new(program, mesh, textures)?))
    }
}

impl Lesson for Textured {
    fn render(&mut self, _frame: &Frame) -> Result<(), AppError> {
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(unit as u32);
        }
        self.program.use_program()?;
        self.mesh.draw();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_fallback_has_transparent_cells() {
        let face = face_fallback();
        assert_eq!(face.get_pixel(0, 0).0[3], 255);
        assert_eq!(face.get_pixel(64, 0).0[3], 0);
    }

    #[test]
    fn test_single_texture_uses_container_only() {
        let textures = TextureSettings::default();
        let sources = texture_sources(&textures, 1);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].0, textures.container.as_path());
    }

    #[test]
    fn test_sources_follow_unit_order() {
        let textures = TextureSettings::default();
        let paths: Vec<&Path> = texture_sources(&textures, 2)
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(
            paths,
            vec![textures.container.as_path(), textures.face.as_path()]
        );
        assert_eq!(texture_sources(&textures, 5).len(), 2);
    }
}
