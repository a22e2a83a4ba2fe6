// ABOUTME: Build dispatcher contract: one ImageRecord per service actually built.
// ABOUTME: The orchestrator treats the builder as an opaque single-shot call.

mod engine_builder;

pub use engine_builder::EngineBuilder;

use crate::project::Composition;
use crate::types::ServiceName;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The orchestrator's output unit: one per declared service, produced by the
/// builder or synthesized for skipped services during reconciliation.
#[derive(Debug, Clone, Serialize)]
pub struct ImageRecord {
    pub service_name: ServiceName,
    /// Resolved image reference.
    pub name: String,
    /// Build log, pull log, or the fixed skip message.
    pub logs: String,
    /// Opaque build metadata; empty for skipped services.
    pub props: BTreeMap<String, String>,
}

/// Everything the build subsystem needs for one dispatch.
#[derive(Debug)]
pub struct BuildRequest<'a> {
    pub composition: &'a Composition,
    pub source: &'a Path,
    pub project_name: &'a str,
    pub arch: &'a str,
    pub device_type: &'a str,
    pub emulated: bool,
    /// Opaque options passed through into record props.
    pub options: BTreeMap<String, String>,
}

/// Build subsystem boundary. A failure fails the whole deploy; the
/// orchestrator never retries.
#[async_trait]
pub trait ImageBuilder: Send + Sync {
    async fn build(
        &self,
        request: &BuildRequest<'_>,
    ) -> Result<BTreeMap<ServiceName, ImageRecord>, BuildError>;
}

/// Errors from build dispatch.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("build failed for service '{service}': {message}")]
    Service {
        service: ServiceName,
        message: String,
    },

    #[error("build dispatch failed: {0}")]
    Dispatch(String),
}
