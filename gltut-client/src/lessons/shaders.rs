//! Lessons about getting data into shaders: stage outputs, uniforms and vertex attributes.

use std::sync::Arc;

use glam::Vec4;
use glow::HasContext;
use gltut_core::ShaderProgram;

use super::{Draw, Frame, Lesson, LessonContext, StaticScene};
use crate::{
    abs::{GpuGuard, Mesh, create_buffer},
    error::AppError,
    render::{ColorVertex, PositionVertex, colored, pos},
};

const TRIANGLE: [PositionVertex; 3] = [
    pos(-0.5, -0.5, 0.0),
    pos(0.5, -0.5, 0.0),
    pos(0.0, 0.5, 0.0),
];

const COLORED_TRIANGLE: [ColorVertex; 3] = [
    colored([0.5, -0.5, 0.0], [1.0, 0.0, 0.0]),  // bottom right
    colored([-0.5, -0.5, 0.0], [0.0, 1.0, 0.0]), // bottom left
    colored([0.0, 0.5, 0.0], [0.0, 0.0, 1.0]),   // top
];

pub fn ins_and_outs(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
    let program = crate::shader_program!(ctx.gl, "ins_and_outs")?;
    let mesh = Mesh::new_unindexed(ctx.gl, &program, &TRIANGLE, glow::TRIANGLES)?;
    Ok(Box::new(StaticScene::new(vec![Draw { mesh, program }])))
}

pub fn more_attributes(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
    let program = crate::shader_program!(ctx.gl, "vertex_color")?;
    let mesh = Mesh::new_unindexed(ctx.gl, &program, &COLORED_TRIANGLE, glow::TRIANGLES)?;
    Ok(Box::new(StaticScene::new(vec![Draw { mesh, program }])))
}

/// Green channel of the pulsing colour at `time` seconds, always in `[0, 1]`.
pub fn pulse(time: f32) -> f32 {
    time.sin() / 2.0 + 0.5
}

/// A triangle whose colour is written through the `ourColor` uniform every frame.
pub struct PulsingColor {
    mesh: Mesh,
    program: ShaderProgram,
}

impl PulsingColor {
    pub fn build(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
        let program = crate::shader_program!(ctx.gl, "uniform_color")?;
        let mesh = Mesh::new_unindexed(ctx.gl, &program, &TRIANGLE, glow::TRIANGLES)?;
        Ok(Box::new(Self { mesh, program }))
    }
}

impl Lesson for PulsingColor {
    fn render(&mut self, frame: &Frame) -> Result<(), AppError> {
        let color = Vec4::new(0.0, pulse(frame.time), 0.0, 1.0);
        self.program.set_uniform("ourColor", color)?;
        self.mesh.draw();
        Ok(())
    }
}

/// The OpenGL 4.3 separate attribute format path.
///
/// Positions and colours live in two buffers bound to vertex-buffer slots 0 and 1. The attribute
/// formats are declared without naming a buffer, and each attribute is attached to its slot by
/// name through the program's attribute cache.
pub struct VertexBinding {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
    buffers: [glow::Buffer; 3],
    program: ShaderProgram,
}

const QUAD_POSITIONS: [f32; 12] = [
    -0.8, -0.8, 0.0, // bottom left
    0.8, -0.8, 0.0, // bottom right
    0.8, 0.8, 0.0, // top right
    -0.8, 0.8, 0.0, // top left
];

const QUAD_COLORS: [f32; 12] = [
    1.0, 0.0, 0.0, // bottom left
    0.0, 1.0, 0.0, // bottom right
    0.0, 0.0, 1.0, // top right
    1.0, 0.0, 1.0, // top left
];

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

const POSITION_SLOT: u32 = 0;
const COLOR_SLOT: u32 = 1;

impl VertexBinding {
    pub fn build(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
        let gl = ctx.gl;
        let program = crate::shader_program!(gl, "vertex_color")?;
        let position = program.attrib_location("aPosition")?;
        let color = program.attrib_location("aColor")?;

        unsafe {
            let max_attribs = gl.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS);
            log::debug!("Maximum number of vertex attributes supported: {max_attribs}");

            let delete_buffer = |buffer: glow::Buffer| gl.delete_buffer(buffer);
            let position_buffer = create_buffer(gl, glow::ARRAY_BUFFER, &QUAD_POSITIONS)?;
            let position_buffer = GpuGuard::new(position_buffer, delete_buffer);
            let color_buffer = create_buffer(gl, glow::ARRAY_BUFFER, &QUAD_COLORS)?;
            let color_buffer = GpuGuard::new(color_buffer, delete_buffer);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            let vao = gl.create_vertex_array().map_err(AppError::Gpu)?;
            let vao = GpuGuard::new(vao, |vao| gl.delete_vertex_array(vao));
            gl.bind_vertex_array(Some(vao.get()));

            gl.enable_vertex_attrib_array(position);
            gl.enable_vertex_attrib_array(color);

            let stride = 3 * size_of::<f32>() as i32;
            gl.bind_vertex_buffer(POSITION_SLOT, Some(position_buffer.get()), 0, stride);
            gl.bind_vertex_buffer(COLOR_SLOT, Some(color_buffer.get()), 0, stride);

            gl.vertex_attrib_format_f32(position, 3, glow::FLOAT, false, 0);
            program.bind_attrib_to_vertex_buffer_slot("aPosition", POSITION_SLOT)?;
            gl.vertex_attrib_format_f32(color, 3, glow::FLOAT, false, 0);
            program.bind_attrib_to_vertex_buffer_slot("aColor", COLOR_SLOT)?;

            let index_buffer = create_buffer(gl, glow::ELEMENT_ARRAY_BUFFER, &QUAD_INDICES)?;
            let index_buffer = GpuGuard::new(index_buffer, delete_buffer);
            gl.bind_vertex_array(None);

            Ok(Box::new(Self {
                gl: Arc::clone(gl),
                vao: vao.release(),
                buffers: [
                    position_buffer.release(),
                    color_buffer.release(),
                    index_buffer.release(),
                ],
                program,
            }))
        }
    }
}

impl Lesson for VertexBinding {
    fn render(&mut self, _frame: &Frame) -> Result<(), AppError> {
        self.program.use_program()?;
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_elements(
                glow::TRIANGLES,
                QUAD_INDICES.len() as i32,
                glow::UNSIGNED_INT,
                0,
            );
            self.gl.bind_vertex_array(None);
        }
        Ok(())
    }
}

impl Drop for VertexBinding {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
            for buffer in self.buffers.into_iter().rev() {
                self.gl.delete_buffer(buffer);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_stays_in_unit_range() {
        for step in 0..1000 {
            let value = pulse(step as f32 * 0.05);
            assert!((0.0..=1.0).contains(&value));
        }
        assert_eq!(pulse(0.0), 0.5);
    }

    #[test]
    fn test_binding_quad_tables_agree() {
        assert_eq!(QUAD_POSITIONS.len(), QUAD_COLORS.len());
        let vertex_count = (QUAD_POSITIONS.len() / 3) as u32;
        assert!(QUAD_INDICES.iter().all(|&i| i < vertex_count));
    }
}
