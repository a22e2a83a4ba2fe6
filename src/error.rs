// ABOUTME: Application-wide error types for stevedore.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::deploy::DeployError;
use crate::fleet::FleetError;
use crate::project::ProjectError;
use crate::runtime::EngineError;
use crate::types::ParseImageRefError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("an explicit image argument cannot be combined with --build")]
    ImageWithBuild,

    #[error("missing API token: set STEVEDORE_TOKEN or pass --token")]
    MissingToken,

    #[error("invalid image reference: {0}")]
    Image(#[from] ParseImageRefError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
