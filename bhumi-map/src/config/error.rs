//! Configuration loading errors.

use crate::error::MapError;

/// Config load error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigLoadError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(String),

    /// YAML parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Parsed values rejected by a runtime config
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] MapError),
}
