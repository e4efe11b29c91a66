//! The core of the gltut lessons.
//!
//! This crate holds the one reusable piece shared by every lesson: [`ShaderProgram`], a linked
//! vertex + fragment program whose active uniform and attribute locations are resolved once at
//! link time and looked up by name afterwards. The program talks to the GPU only through the
//! [`Driver`] trait, which [`glow::Context`] implements.

pub mod driver;
pub mod error;
pub mod program;
pub mod uniform;

#[cfg(test)]
mod fake;

pub use driver::{ActiveVariable, Driver, ShaderStage};
pub use error::ShaderError;
pub use program::ShaderProgram;
pub use uniform::{Uniform, UniformValue};
