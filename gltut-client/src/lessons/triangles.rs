//! Lessons drawing plain geometry: one triangle, an indexed rectangle and two separate objects.

use super::{Draw, Lesson, LessonContext, StaticScene};
use crate::{
    abs::Mesh,
    error::AppError,
    render::{PositionVertex, pos},
};

const TRIANGLE: [PositionVertex; 3] = [
    pos(-0.5, -0.5, 0.0), // bottom left
    pos(0.5, -0.5, 0.0),  // bottom right
    pos(0.0, 0.5, 0.0),   // top
];

const RECTANGLE: [PositionVertex; 4] = [
    pos(0.5, 0.5, 0.0),   // top right
    pos(0.5, -0.5, 0.0),  // bottom right
    pos(-0.5, -0.5, 0.0), // bottom left
    pos(-0.5, 0.5, 0.0),  // top left
];

const RECTANGLE_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

const LEFT_TRIANGLE: [PositionVertex; 3] = [
    pos(-0.9, -0.5, 0.0),
    pos(-0.1, -0.5, 0.0),
    pos(-0.5, 0.5, 0.0),
];

const RIGHT_TRIANGLE: [PositionVertex; 3] = [
    pos(0.1, -0.5, 0.0),
    pos(0.9, -0.5, 0.0),
    pos(0.5, 0.5, 0.0),
];

pub fn hello_triangle(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
    let program = crate::shader_program!(ctx.gl, "position")?;
    let mesh = Mesh::new_unindexed(ctx.gl, &program, &TRIANGLE, glow::TRIANGLES)?;
    Ok(Box::new(StaticScene::new(vec![Draw { mesh, program }])))
}

pub fn element_buffer(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
    let program = crate::shader_program!(ctx.gl, "position")?;
    let mesh = Mesh::new(
        ctx.gl,
        &program,
        &RECTANGLE,
        &RECTANGLE_INDICES,
        glow::TRIANGLES,
    )?;
    Ok(Box::new(StaticScene::new(vec![Draw { mesh, program }])))
}

pub fn more_objects(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
    let orange = crate::shader_program!(ctx.gl, "position")?;
    let yellow = crate::shader_program!(ctx.gl, "yellow")?;

    let left = Mesh::new_unindexed(ctx.gl, &orange, &LEFT_TRIANGLE, glow::TRIANGLES)?;
    let right = Mesh::new_unindexed(ctx.gl, &yellow, &RIGHT_TRIANGLE, glow::TRIANGLES)?;

    Ok(Box::new(StaticScene::new(vec![
        Draw {
            mesh: left,
            program: orange,
        },
        Draw {
            mesh: right,
            program: yellow,
        },
    ])))
}
