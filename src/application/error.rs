use thiserror::Error;

use crate::config::LoadError;
use crate::domain::error::ValidationError;
use crate::infra::error::{InfraError, LaunchError};

/// Top-level error surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error("failed to encode command list: {0}")]
    Encode(#[from] serde_json::Error),
}
