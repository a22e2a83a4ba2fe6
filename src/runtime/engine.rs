// ABOUTME: Engine capability trait for the local container runtime.
// ABOUTME: Inspect, pull, and build images; implementations may be faked in tests.

use crate::project::BuildSpec;
use crate::types::ImageRef;
use async_trait::async_trait;

/// Image operations the deploy flow needs from a container runtime.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Check whether an image reference resolves locally.
    async fn image_exists(&self, reference: &ImageRef) -> Result<bool, EngineError>;

    /// The content-addressable id of a local image, if present.
    async fn image_id(&self, reference: &ImageRef) -> Result<Option<String>, EngineError>;

    /// Pull an image from its registry. Returns the pull log.
    async fn pull_image(&self, reference: &ImageRef) -> Result<String, EngineError>;

    /// Build an image from a build spec and tag it. Returns the build log.
    async fn build_image(
        &self,
        spec: &BuildSpec,
        platform: Option<&str>,
    ) -> Result<String, EngineError>;
}

/// Errors from engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to connect to container runtime: {0}")]
    Connection(String),

    #[error("image not found: {0}")]
    NotFound(String),

    #[error("pull failed: {0}")]
    PullFailed(String),

    #[error("build failed: {0}")]
    BuildFailed(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}
