//! Error types for schema-setup

use std::io;

use thiserror::Error;

/// Result type alias for schema-setup operations
pub type Result<T> = std::result::Result<T, SetupError>;

/// Errors that can occur while building a setup file
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Failed to parse SQL schema: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Unknown table: {0}")]
    UnknownTable(String),

    #[error("Template error: {0}")]
    TemplateError(String),

    /// Opening, locking or writing the output file failed.
    ///
    /// The underlying cause is kept as the error source but never shows up
    /// in the message.
    #[error("An error has occurred during the generation of the {filename} setup file.")]
    GenerationFailed {
        filename: String,
        #[source]
        source: io::Error,
    },
}

impl SetupError {
    pub(crate) fn generation_failed(filename: &str, source: io::Error) -> Self {
        SetupError::GenerationFailed {
            filename: filename.to_string(),
            source,
        }
    }
}

impl From<sqlparser::parser::ParserError> for SetupError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        SetupError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for SetupError {
    fn from(err: config::ConfigError) -> Self {
        SetupError::ConfigError(err.to_string())
    }
}
