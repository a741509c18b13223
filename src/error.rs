//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Network-level failure, rendered verbatim in the transcript.
    #[error("{0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment file error: {0}")]
    EnvVar(#[from] dotenvy::Error),

    #[error("Unknown persona '{0}'. Expected coach-nova or mood-mentor")]
    UnknownPersona(String),
}

pub type Result<T> = std::result::Result<T, Error>;
