use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<crate::config::ConfigError> for ReportError {
    #[inline]
    fn from(err: crate::config::ConfigError) -> Self {
        ReportError::Config(err.to_string())
    }
}

impl From<sqlx::Error> for ReportError {
    #[inline]
    fn from(err: sqlx::Error) -> Self {
        ReportError::Database(err.to_string())
    }
}

pub mod commands;
pub mod config;
pub mod database;
pub mod generation;
pub mod history;
pub mod pipeline;
