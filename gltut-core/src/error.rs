//! Errors produced while building or using a [`ShaderProgram`](crate::ShaderProgram).

use thiserror::Error;

use crate::driver::ShaderStage;

/// Everything that can go wrong with a shader program.
///
/// `Compile`, `Link` and `ObjectCreation` abort construction. The lookup errors only fail the
/// call that produced them, the program stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderError {
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to link shader program:\n{log}")]
    Link { log: String },
    #[error("the driver could not create a GPU object: {0}")]
    ObjectCreation(String),
    #[error("uniform `{0}` is not active in this program")]
    UnknownUniform(String),
    #[error("attribute `{0}` is not active in this program")]
    UnknownAttribute(String),
    #[error("shader program used after it was disposed")]
    UseAfterDispose,
}
