//! Module providing the [`Lesson`] trait and the registry of every lesson.
//!
//! A lesson owns the GPU objects it draws and releases them when dropped. Lessons are built once
//! the window and context exist, through the `build` function of their [`LessonInfo`].

use std::sync::Arc;

use gltut_core::ShaderProgram;

use crate::{abs::Mesh, error::AppError, settings::GlVersion, settings::Settings};

pub mod shaders;
pub mod textures;
pub mod transforms;
pub mod triangles;
pub mod version;

/// Timing information for one rendered frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame {
    /// Seconds since the lesson started.
    pub time: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
}

/// Everything a lesson may need while creating its GPU objects.
pub struct LessonContext<'a> {
    pub gl: &'a Arc<glow::Context>,
    pub settings: &'a Settings,
    /// Drawable size in pixels.
    pub size: (u32, u32),
}

impl LessonContext<'_> {
    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.size.0, self.size.1)
    }
}

/// Width over height, guarding against minimized windows.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// The Lesson trait defines the common interface for all lessons.
pub trait Lesson {
    /// Draws one frame. The colour and depth buffers are already cleared.
    fn render(&mut self, frame: &Frame) -> Result<(), AppError>;

    /// Called after the drawable was resized and the viewport updated.
    fn resize(&mut self, _width: u32, _height: u32) {}
}

pub type BuildFn = fn(&LessonContext) -> Result<Box<dyn Lesson>, AppError>;

/// A registry entry.
pub struct LessonInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub min_gl_version: GlVersion,
    pub build: BuildFn,
}

const GL_3_3: GlVersion = GlVersion::new(3, 3);

pub const LESSONS: &[LessonInfo] = &[
    LessonInfo {
        name: "version",
        description: "Open a window and log the driver and version strings",
        min_gl_version: GL_3_3,
        build: version::DriverInfo::build,
    },
    LessonInfo {
        name: "hello-triangle",
        description: "One triangle from a vertex buffer",
        min_gl_version: GL_3_3,
        build: triangles::hello_triangle,
    },
    LessonInfo {
        name: "element-buffer",
        description: "A rectangle from four vertices and an element buffer",
        min_gl_version: GL_3_3,
        build: triangles::element_buffer,
    },
    LessonInfo {
        name: "more-objects",
        description: "Two triangles in two vertex arrays drawn with two programs",
        min_gl_version: GL_3_3,
        build: triangles::more_objects,
    },
    LessonInfo {
        name: "ins-and-outs",
        description: "The vertex stage hands a colour to the fragment stage",
        min_gl_version: GL_3_3,
        build: shaders::ins_and_outs,
    },
    LessonInfo {
        name: "uniforms",
        description: "A triangle whose colour is pulsed through a uniform",
        min_gl_version: GL_3_3,
        build: shaders::PulsingColor::build,
    },
    LessonInfo {
        name: "more-attributes",
        description: "Interleaved position and colour attributes",
        min_gl_version: GL_3_3,
        build: shaders::more_attributes,
    },
    LessonInfo {
        name: "vertex-binding",
        description: "Separate attribute format: buffers bound to slots, attributes wired by name",
        min_gl_version: GlVersion::new(4, 3),
        build: shaders::VertexBinding::build,
    },
    LessonInfo {
        name: "textures",
        description: "A textured rectangle",
        min_gl_version: GL_3_3,
        build: textures::Textured::build_single,
    },
    LessonInfo {
        name: "multiple-textures",
        description: "Two textures mixed on two texture units",
        min_gl_version: GL_3_3,
        build: textures::Textured::build_mixed,
    },
    LessonInfo {
        name: "transformations",
        description: "A rotated, scaled and translated rectangle",
        min_gl_version: GL_3_3,
        build: transforms::Transformations::build,
    },
    LessonInfo {
        name: "coordinate-systems",
        description: "Model, view and projection matrices with a rotating model",
        min_gl_version: GL_3_3,
        build: transforms::CoordinateSystems::build,
    },
    LessonInfo {
        name: "cube",
        description: "A textured cube spinning with depth testing",
        min_gl_version: GL_3_3,
        build: transforms::Cube::build,
    },
];

/// Looks up a lesson by name.
pub fn find(name: &str) -> Option<&'static LessonInfo> {
    LESSONS.iter().find(|lesson| lesson.name == name)
}

/// A mesh paired with the program that draws it.
pub struct Draw {
    pub mesh: Mesh,
    pub program: ShaderProgram,
}

/// A lesson that draws fixed meshes and never changes a uniform.
pub struct StaticScene {
    draws: Vec<Draw>,
}

impl StaticScene {
    pub fn new(draws: Vec<Draw>) -> Self {
        Self { draws }
    }
}

impl Lesson for StaticScene {
    fn render(&mut self, _frame: &Frame) -> Result<(), AppError> {
        for draw in &self.draws {
            draw.program.use_program()?;
            draw.mesh.draw();
        }
        Ok(())
    }
}
