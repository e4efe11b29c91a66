//! Vertex layouts shared by the lessons.
//!
//! The GLSL sources used by the lessons live in `render/shaders/<name>/{vert,frag}.glsl` and are
//! embedded with [`shader_program!`](crate::shader_program).

use std::mem::{offset_of, size_of};

use glam::{Vec2, Vec3};
use gltut_core::{ShaderError, ShaderProgram};

use crate::abs::{Vertex, float_attrib};

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct PositionVertex {
    pub position: Vec3,
}

impl Vertex for PositionVertex {
    fn vertex_attribs(gl: &glow::Context, program: &ShaderProgram) -> Result<(), ShaderError> {
        float_attrib(gl, program, "aPosition", 3, size_of::<Self>(), 0)
    }
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct ColorVertex {
    pub position: Vec3,
    pub color: Vec3,
}

impl Vertex for ColorVertex {
    fn vertex_attribs(gl: &glow::Context, program: &ShaderProgram) -> Result<(), ShaderError> {
        let stride = size_of::<Self>();
        float_attrib(gl, program, "aPosition", 3, stride, offset_of!(Self, position))?;
        float_attrib(gl, program, "aColor", 3, stride, offset_of!(Self, color))
    }
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct TexturedVertex {
    pub position: Vec3,
    pub tex_coord: Vec2,
}

impl Vertex for TexturedVertex {
    fn vertex_attribs(gl: &glow::Context, program: &ShaderProgram) -> Result<(), ShaderError> {
        let stride = size_of::<Self>();
        float_attrib(gl, program, "aPosition", 3, stride, offset_of!(Self, position))?;
        float_attrib(gl, program, "aTexCoord", 2, stride, offset_of!(Self, tex_coord))
    }
}

/// Shorthand constructors for the vertex tables.
pub const fn pos(x: f32, y: f32, z: f32) -> PositionVertex {
    PositionVertex {
        position: Vec3::new(x, y, z),
    }
}

pub const fn colored(position: [f32; 3], color: [f32; 3]) -> ColorVertex {
    ColorVertex {
        position: Vec3::from_array(position),
        color: Vec3::from_array(color),
    }
}

pub const fn textured(position: [f32; 3], tex_coord: [f32; 2]) -> TexturedVertex {
    TexturedVertex {
        position: Vec3::from_array(position),
        tex_coord: Vec2::from_array(tex_coord),
    }
}

/// A unit quad centred on the origin, two triangles sharing the diagonal.
pub const QUAD: [TexturedVertex; 4] = [
    textured([0.5, 0.5, 0.0], [1.0, 1.0]),   // top right
    textured([0.5, -0.5, 0.0], [1.0, 0.0]),  // bottom right
    textured([-0.5, -0.5, 0.0], [0.0, 0.0]), // bottom left
    textured([-0.5, 0.5, 0.0], [0.0, 1.0]),  // top left
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layouts_are_tightly_packed() {
        assert_eq!(size_of::<PositionVertex>(), 12);
        assert_eq!(size_of::<ColorVertex>(), 24);
        assert_eq!(offset_of!(ColorVertex, color), 12);
        assert_eq!(size_of::<TexturedVertex>(), 20);
        assert_eq!(offset_of!(TexturedVertex, tex_coord), 12);
    }

    #[test]
    fn test_quad_indices_reference_quad() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD.len()));
    }
}
