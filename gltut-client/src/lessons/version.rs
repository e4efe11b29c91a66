//! The first lesson: an empty window and the driver's identification strings.

use glow::HasContext;

use super::{Frame, Lesson, LessonContext};
use crate::error::AppError;

/// Identification strings reported by the driver.
#[derive(Debug, Clone, Default)]
pub struct DriverInfo {
    pub version: String,
    pub vendor: String,
    pub renderer: String,
    pub shading_language_version: String,
    pub extensions: Vec<String>,
    pub max_vertex_attribs: i32,
}

impl DriverInfo {
    pub fn query(gl: &glow::Context) -> Self {
        unsafe {
            let mut extensions: Vec<String> = gl.supported_extensions().iter().cloned().collect();
            extensions.sort();

            Self {
                version: gl.get_parameter_string(glow::VERSION),
                vendor: gl.get_parameter_string(glow::VENDOR),
                renderer: gl.get_parameter_string(glow::RENDERER),
                shading_language_version: gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
                extensions,
                max_vertex_attribs: gl.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS),
            }
        }
    }

    pub fn log(&self) {
        log::info!("Version:                {}", self.version);
        log::info!("Vendor:                 {}", self.vendor);
        log::info!("Renderer:               {}", self.renderer);
        log::info!("ShadingLanguageVersion: {}", self.shading_language_version);
        log::info!("Max vertex attributes:  {}", self.max_vertex_attribs);
        log::info!("Extensions:             {}", self.extensions.len());
        for extension in &self.extensions {
            log::debug!("  {extension}");
        }
    }

    pub fn build(ctx: &LessonContext) -> Result<Box<dyn Lesson>, AppError> {
        let info = Self::query(ctx.gl);
        info.log();
        Ok(Box::new(info))
    }
}

impl Lesson for DriverInfo {
    fn render(&mut self, _frame: &Frame) -> Result<(), AppError> {
        Ok(())
    }
}
