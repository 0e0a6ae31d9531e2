//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Registry parsing error.
    #[error("registry parse error: {0}")]
    Parse(#[from] boxgen_schema::ParseError),

    /// Registry validation error.
    #[error("registry error: {0}")]
    Schema(#[from] boxgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
