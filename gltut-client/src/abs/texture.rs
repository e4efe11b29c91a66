//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use crate::error::AppError;

/// Builds a `size`x`size` checkerboard of `cell`-pixel squares alternating `a` and `b`.
pub fn checkerboard(size: u32, cell: u32, a: [u8; 4], b: [u8; 4]) -> RgbaImage {
    let cell = cell.max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba(a)
        } else {
            Rgba(b)
        }
    })
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads `image` as an RGBA texture with mipmaps and repeat wrapping.
    ///
    /// The image is flipped vertically since OpenGL expects the first row at the bottom.
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage) -> Result<Self, AppError> {
        let (width, height) = image.dimensions();
        let data = image.flipv().to_rgba8().into_raw();
        unsafe {
            let texture = gl.create_texture().map_err(AppError::Gpu)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data.as_slice())),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Loads an image file from disk and uploads it.
    pub fn load(gl: &Arc<glow::Context>, path: &Path) -> Result<Self, AppError> {
        let image = image::open(path).map_err(|source| AppError::Texture {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded texture {} ({}x{})", path.display(), image.width(), image.height());
        Self::new(gl, &image)
    }

    /// Loads `path`, or uploads `fallback` when the file cannot be read.
    pub fn load_or(
        gl: &Arc<glow::Context>,
        path: &Path,
        fallback: RgbaImage,
    ) -> Result<Self, AppError> {
        match Self::load(gl, path) {
            Err(AppError::Texture { path, source }) => {
                log::warn!("{}: {source}, using a generated texture", path.display());
                Self::new(gl, &DynamicImage::ImageRgba8(fallback))
            }
            other => other,
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
