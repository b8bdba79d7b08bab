use depscope_graph::GraphError;
use thiserror::Error;

/// Result type for path configuration
pub type Result<T> = std::result::Result<T, PathError>;

/// Errors raised while building a path expression.
///
/// Matching itself never fails; an empty result is a valid answer.
#[derive(Error, Debug)]
pub enum PathError {
    /// Relation, relation set or node kind could not be resolved
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A term is not well formed
    #[error("Invalid term #{index}: {reason}")]
    InvalidTerm { index: usize, reason: String },

    /// Configuration text could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PathError {
    pub fn invalid_term(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTerm {
            index,
            reason: reason.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
