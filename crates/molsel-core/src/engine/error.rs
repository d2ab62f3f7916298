use super::config::ConfigError;
use crate::language::error::SyntaxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid selection: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// The syntax error behind this failure, if any.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            EngineError::Syntax(e) => Some(e),
            EngineError::Config(_) => None,
        }
    }
}
