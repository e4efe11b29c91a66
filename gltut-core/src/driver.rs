//! The GPU driver boundary.
//!
//! [`ShaderProgram`](crate::ShaderProgram) depends on exactly the capabilities listed in the
//! [`Driver`] trait: compiling a stage, linking a program, reflecting its active variables,
//! making it current, writing uniforms, wiring attributes to vertex-buffer slots and deleting
//! the objects again. [`glow::Context`] is the production implementation.
//!
//! Driver calls must all be issued from the thread that owns the GL context.

use std::fmt;

use glow::HasContext;

use crate::uniform::UniformValue;

/// The programmable pipeline stages a [`ShaderProgram`](crate::ShaderProgram) is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL enum used to create a shader object of this stage.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// An active uniform or attribute as reported by the driver after linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVariable {
    pub name: String,
    /// Array length, `1` for non-arrays.
    pub size: i32,
    /// GL type enum, e.g. `glow::FLOAT_VEC3`.
    pub gl_type: u32,
}

/// The set of driver capabilities a shader program needs.
pub trait Driver {
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug + PartialEq;
    type UniformLocation: Clone + fmt::Debug;

    /// Allocates an empty shader object for `stage`.
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;

    /// Uploads `source` and compiles it. Returns the info log on failure.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> Result<(), String>;

    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);

    /// Links the attached stages. Returns the info log on failure.
    fn link_program(&self, program: Self::Program) -> Result<(), String>;

    fn delete_program(&self, program: Self::Program);

    fn active_uniforms(&self, program: Self::Program) -> Vec<ActiveVariable>;

    fn active_attributes(&self, program: Self::Program) -> Vec<ActiveVariable>;

    /// `None` for names without a location, such as uniform block members.
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;

    /// `None` for names without a location, such as `gl_VertexID`.
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    /// Sets the context's current program.
    fn use_program(&self, program: Option<Self::Program>);

    /// Writes `value` into the uniform at `location` of the current program.
    fn write_uniform(&self, location: &Self::UniformLocation, value: &UniformValue);

    /// Associates attribute `attrib` of the bound vertex array with binding slot `slot`.
    fn vertex_attrib_binding(&self, attrib: u32, slot: u32);
}

impl Driver for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type UniformLocation = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage.gl_enum()) }
    }

    fn compile_shader(&self, shader: Self::Shader, source: &str) -> Result<(), String> {
        unsafe {
            self.shader_source(shader, source);
            HasContext::compile_shader(self, shader);

            if self.get_shader_compile_status(shader) {
                Ok(())
            } else {
                Err(self.get_shader_info_log(shader))
            }
        }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) -> Result<(), String> {
        unsafe {
            HasContext::link_program(self, program);

            if self.get_program_link_status(program) {
                Ok(())
            } else {
                Err(self.get_program_info_log(program))
            }
        }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn active_uniforms(&self, program: Self::Program) -> Vec<ActiveVariable> {
        unsafe {
            let count = self.get_active_uniforms(program);
            (0..count)
                .filter_map(|index| self.get_active_uniform(program, index))
                .map(|uniform| ActiveVariable {
                    name: uniform.name,
                    size: uniform.size,
                    gl_type: uniform.utype,
                })
                .collect()
        }
    }

    fn active_attributes(&self, program: Self::Program) -> Vec<ActiveVariable> {
        unsafe {
            let count = self.get_active_attributes(program);
            (0..count)
                .filter_map(|index| self.get_active_attribute(program, index))
                .map(|attribute| ActiveVariable {
                    name: attribute.name,
                    size: attribute.size,
                    gl_type: attribute.atype,
                })
                .collect()
        }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn write_uniform(&self, location: &Self::UniformLocation, value: &UniformValue) {
        let location = Some(location);
        unsafe {
            match value {
                UniformValue::Int(v) => self.uniform_1_i32(location, *v),
                UniformValue::Float(v) => self.uniform_1_f32(location, *v),
                UniformValue::Vec2(v) => self.uniform_2_f32(location, v.x, v.y),
                UniformValue::Vec3(v) => self.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Mat4(m) => {
                    self.uniform_matrix_4_f32_slice(location, false, &m.to_cols_array())
                }
            }
        }
    }

    fn vertex_attrib_binding(&self, attrib: u32, slot: u32) {
        unsafe { HasContext::vertex_attrib_binding(self, attrib, slot) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display_and_enum() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
        assert_eq!(ShaderStage::Vertex.gl_enum(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
    }
}
