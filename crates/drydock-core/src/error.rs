//! Error types for drydock-core

use thiserror::Error;

/// Errors produced by the customization pipeline.
#[derive(Error, Debug)]
pub enum DrydockError {
    /// A customizer precondition was not satisfied. Carries the name of
    /// the missing argument (usually an environment variable).
    #[error("missing required argument: {0}")]
    MissingRequiredArgument(&'static str),

    /// Docker Engine API error, surfaced unchanged.
    #[error(transparent)]
    Docker(#[from] bollard::errors::Error),
}

/// Result alias for drydock operations.
pub type Result<T> = std::result::Result<T, DrydockError>;
