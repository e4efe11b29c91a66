//! Transformation lessons: a single transform matrix, then model/view/projection and a cube.
//!
//! glam matrices use column vectors, so a transform applies right to left: `T * S * R` rotates
//! first, then scales, then translates. The shaders multiply in the same order.

use glam::{Mat4, Vec3};
use glow::HasContext;
use gltut_core::ShaderProgram;

use super::{Frame, Lesson, LessonContext, aspect_ratio};
use crate::{
    abs::{Mesh, Texture},
    error::AppError,
    lessons::textures::load_textures,
    render::{QUAD, QUAD_INDICES, TexturedVertex, textured},
};

/// Rotate 20 degrees about Z, scale by 1.1, then move by (0.1, 0.1).
pub fn static_transform() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.1, 0.1, 0.0))
        * Mat4::from_scale(Vec3::splat(1.1))
        * Mat4::from_rotation_z(20f32.to_radians())
}

/// Three units back from the origin.
pub fn view_matrix() -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0))
}

/// 45 degree vertical field of view, clipping at 0.1 and 100.
pub fn projection_matrix(aspect_ratio: f32) -> Mat4 {
    Mat4::perspective_rh_gl(45f32.to_radians(), aspect_ratio, 0.1, 100.0)
}

/// Textures bound to units 0 and 1 plus the matching sampler uniforms.
struct TexturePair {
    textures: Vec<Texture>,
}

impl TexturePair {
    fn load(ctx: &LessonContext, program: &ShaderProgram) -> Result<Self, AppError> {
        let textures = load_textures(ctx, 2)?;
        program.set_uniform("texture0", 0i32)?;
        program.set_uniform("texture1", 1i32)?;
        Ok(Self { textures })
    }

    fn bind(&self) {
        for (unit, texture) in self.textures.iter().enumerate() {
            texture.bind(unit as u32);
        }
    }
}

pub struct Transformations {
    mesh: Mesh,
    program: ShaderProgram,
    textures: TexturePair,
}

impl Transformations {
    pub fn build(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
        let program = crate::shader_program!(ctx.gl, "transform")?;
        let mesh = Mesh::new(ctx.gl, &program, &QUAD, &QUAD_INDICES, glow::TRIANGLES)?;
        let textures = TexturePair::load(ctx, &program)?;
        Ok(Box::new(Self {
            mesh,
            program,
            textures,
        }))
    }
}

impl Lesson for Transformations {
    fn render(&mut self, _frame: &Frame) -> Result<(), AppError> {
        self.textures.bind();
        self.program.set_uniform("transform", static_transform())?;
        self.mesh.draw();
        Ok(())
    }
}

/// Model rotation of the coordinate-systems lesson: 4 degrees per second about X.
pub fn tilting_model(time: f32) -> Mat4 {
    Mat4::from_rotation_x((4.0 * time).to_radians())
}

/// A rectangle with separate model, view and projection matrices.
pub struct CoordinateSystems {
    mesh: Mesh,
    program: ShaderProgram,
    textures: TexturePair,
    projection: Mat4,
}

impl CoordinateSystems {
    pub fn build(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
        unsafe {
            ctx.gl.enable(glow::DEPTH_TEST);
        }
        let program = crate::shader_program!(ctx.gl, "mvp")?;
        let mesh = Mesh::new(ctx.gl, &program, &QUAD, &QUAD_INDICES, glow::TRIANGLES)?;
        let textures = TexturePair::load(ctx, &program)?;
        program.set_uniform("view", view_matrix())?;
        Ok(Box::new(Self {
            mesh,
            program,
            textures,
            projection: projection_matrix(ctx.aspect_ratio()),
        }))
    }
}

impl Lesson for CoordinateSystems {
    fn render(&mut self, frame: &Frame) -> Result<(), AppError> {
        self.textures.bind();
        self.program.set_uniform("model", tilting_model(frame.time))?;
        self.program.set_uniform("projection", self.projection)?;
        self.mesh.draw();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.projection = projection_matrix(aspect_ratio(width, height));
    }
}

/// Model rotation of the cube: 50 degrees per second about a tilted axis.
pub fn spinning_model(time: f32) -> Mat4 {
    Mat4::from_axis_angle(Vec3::new(0.5, 1.0, 0.0).normalize(), (50.0 * time).to_radians())
}

/// 36 vertices, two triangles per face.
pub const CUBE: [TexturedVertex; 36] = [
    // back
    textured([-0.5, -0.5, -0.5], [0.0, 0.0]),
    textured([0.5, -0.5, -0.5], [1.0, 0.0]),
    textured([0.5, 0.5, -0.5], [1.0, 1.0]),
    textured([0.5, 0.5, -0.5], [1.0, 1.0]),
    textured([-0.5, 0.5, -0.5], [0.0, 1.0]),
    textured([-0.5, -0.5, -0.5], [0.0, 0.0]),
    // front
    textured([-0.5, -0.5, 0.5], [0.0, 0.0]),
    textured([0.5, -0.5, 0.5], [1.0, 0.0]),
    textured([0.5, 0.5, 0.5], [1.0, 1.0]),
    textured([0.5, 0.5, 0.5], [1.0, 1.0]),
    textured([-0.5, 0.5, 0.5], [0.0, 1.0]),
    textured([-0.5, -0.5, 0.5], [0.0, 0.0]),
    // left
    textured([-0.5, 0.5, 0.5], [1.0, 0.0]),
    textured([-0.5, 0.5, -0.5], [1.0, 1.0]),
    textured([-0.5, -0.5, -0.5], [0.0, 1.0]),
    textured([-0.5, -0.5, -0.5], [0.0, 1.0]),
    textured([-0.5, -0.5, 0.5], [0.0, 0.0]),
    textured([-0.5, 0.5, 0.5], [1.0, 0.0]),
    // right
    textured([0.5, 0.5, 0.5], [1.0, 0.0]),
    textured([0.5, 0.5, -0.5], [1.0, 1.0]),
    textured([0.5, -0.5, -0.5], [0.0, 1.0]),
    textured([0.5, -0.5, -0.5], [0.0, 1.0]),
    textured([0.5, -0.5, 0.5], [0.0, 0.0]),
    textured([0.5, 0.5, 0.5], [1.0, 0.0]),
    // bottom
    textured([-0.5, -0.5, -0.5], [0.0, 1.0]),
    textured([0.5, -0.5, -0.5], [1.0, 1.0]),
    textured([0.5, -0.5, 0.5], [1.0, 0.0]),
    textured([0.5, -0.5, 0.5], [1.0, 0.0]),
    textured([-0.5, -0.5, 0.5], [0.0, 0.0]),
    textured([-0.5, -0.5, -0.5], [0.0, 1.0]),
    // top
    textured([-0.5, 0.5, -0.5], [0.0, 1.0]),
    textured([0.5, 0.5, -0.5], [1.0, 1.0]),
    textured([0.5, 0.5, 0.5], [1.0, 0.0]),
    textured([0.5, 0.5, 0.5], [1.0, 0.0]),
    textured([-0.5, 0.5, 0.5], [0.0, 0.0]),
    textured([-0.5, 0.5, -0.5], [0.0, 1.0]),
];

pub struct Cube {
    mesh: Mesh,
    program: ShaderProgram,
    textures: TexturePair,
    projection: Mat4,
}

impl Cube {
    pub fn build(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
        unsafe {
            ctx.gl.enable(glow::DEPTH_TEST);
        }
        let program = crate::shader_program!(ctx.gl, "mvp")?;
        let mesh = Mesh::new_unindexed(ctx.gl, &program, &CUBE, glow::TRIANGLES)?;
        let textures = TexturePair::load(ctx, &program)?;
        program.set_uniform("view", view_matrix())?;
        Ok(Box::new(Self {
            mesh,
            program,
            textures,
            projection: projection_matrix(ctx.aspect_ratio()),
        }))
    }
}

impl Lesson for Cube {
    fn render(&mut self, frame: &Frame) -> Result<(), AppError> {
        self.textures.bind();
        self.program.set_uniform("model", spinning_model(frame.time))?;
        self.program.set_uniform("projection", self.projection)?;
        self.mesh.draw();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.projection = projection_matrix(aspect_ratio(width, height));
    }
}
