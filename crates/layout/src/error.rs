use thiserror::Error;

/// Result type for layout configuration
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Layout runs themselves never fail; these cover configuration only
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LayoutError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
