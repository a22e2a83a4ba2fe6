// ABOUTME: Error types for the deploy orchestration engine.
// ABOUTME: Validation failures are raised before any build or network call.

use crate::build::BuildError;
use crate::fleet::FleetError;
use crate::types::ServiceName;

/// Errors that abort a deploy. Every stage either returns a fully-formed
/// result or raises one of these; there is no partial recovery.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The project declares no services at all.
    #[error("project declares no services")]
    EmptyProject,

    /// Multi-service project, but the fleet's type disallows it.
    #[error(
        "fleet '{fleet}' does not support multi-container releases ({count} services declared)"
    )]
    MulticontainerNotSupported { fleet: String, count: usize },

    /// Multi-service project targeting a legacy fleet.
    #[error("fleet '{fleet}' uses a legacy application type that deploys a single service \
             ({count} services declared)")]
    LegacyMultiService { fleet: String, count: usize },

    /// Internal consistency failure in the router's record set.
    #[error("expected {expected} image record(s) for this release, found {actual}")]
    RecordCount { expected: usize, actual: usize },

    /// The builder returned a record for a service the project never declared.
    #[error("build produced a record for undeclared service '{service}'")]
    UnknownBuildRecord { service: ServiceName },

    /// Build dispatch failed; no release request was issued.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The release API rejected or failed the request.
    #[error(transparent)]
    Api(#[from] FleetError),
}
