use architext_core::ValidationError;

use crate::engine::InvokeError;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The request failed local validation; the model was never called.
    #[error("invalid input for {task}: {source}")]
    InvalidInput {
        task: &'static str,
        #[source]
        source: ValidationError,
    },

    /// The call failed or its output did not conform to the task's schema.
    #[error("{task} failed: {source}")]
    ModelInvocation {
        task: &'static str,
        #[source]
        source: InvokeError,
    },
}

impl GenerateError {
    pub fn task(&self) -> &'static str {
        match self {
            Self::InvalidInput { task, .. } | Self::ModelInvocation { task, .. } => task,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
