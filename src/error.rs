use colloquy_core::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ColloquyError>;

#[derive(Debug, Error)]
pub enum ColloquyError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("language model error: {0}")]
    LanguageModel(String),

    #[error("tool `{0}` not found")]
    ToolNotFound(String),

    #[error("tool `{name}` is missing required parameters: {}", missing.join(", "))]
    InvalidToolInput { name: String, missing: Vec<String> },

    #[error("parameters must be a JSON object: {0}")]
    InvalidParameters(String),

    #[error(transparent)]
    State(#[from] CoreError),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_missing_parameters() {
        let err = ColloquyError::InvalidToolInput {
            name: "web_search".into(),
            missing: vec!["query".into()],
        };
        assert_eq!(
            err.to_string(),
            "tool `web_search` is missing required parameters: query"
        );
    }

    #[test]
    fn wraps_state_errors() {
        let err: ColloquyError = CoreError::InvalidImportance(0).into();
        assert!(matches!(err, ColloquyError::State(CoreError::InvalidImportance(0))));
    }
}
