use crate::language::errors::StructuralError;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error("Function `{name}` exceeded the call depth limit of {limit}")]
    CallDepthExceeded { name: String, limit: usize },
    #[error("Could not start the suspension runtime: {message}")]
    Suspension { message: String },
}

/// Failure of a device or network collaborator. These never abort a run;
/// the driver turns them into diagnostics on the output channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("{feature} no disponible")]
    Unavailable { feature: &'static str },
    #[error("no hay más respuestas para `{prompt}`")]
    InputExhausted { prompt: String },
    #[error("no se pudo leer la entrada: {0}")]
    Input(String),
    #[error("método HTTP no soportado: {0}")]
    UnsupportedMethod(String),
    #[error("error en petición HTTP: {0}")]
    Network(String),
}
