use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Broad class of a state-store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value handed to the store is out of range or inconsistent.
    Validation,
    /// The agent itself was set up incorrectly.
    Configuration,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("memory importance must be between 1 and 10, got {0}")]
    InvalidImportance(i64),

    #[error("system prompt must not be empty")]
    EmptySystemPrompt,

    #[error("tool `{0}` is already registered")]
    DuplicateTool(String),

    #[error("inconsistent action: {0}")]
    InconsistentAction(String),

    #[error("tool `{tool}` requires undeclared parameter `{parameter}`")]
    UndeclaredParameter { tool: String, parameter: String },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::EmptySystemPrompt => ErrorKind::Configuration,
            CoreError::InvalidImportance(_)
            | CoreError::DuplicateTool(_)
            | CoreError::InconsistentAction(_)
            | CoreError::UndeclaredParameter { .. } => ErrorKind::Validation,
        }
    }
}
