// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InitError>;

#[derive(Error, Debug)]
pub enum InitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Connection failed for database {database}: {message}")]
    Connection { database: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for InitError {
    fn from(err: serde_json::Error) -> Self {
        InitError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for InitError {
    fn from(err: config::ConfigError) -> Self {
        InitError::Config(err.to_string())
    }
}
