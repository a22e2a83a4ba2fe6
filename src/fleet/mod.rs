// ABOUTME: Fleet-management service access: metadata lookups and release creation.
// ABOUTME: Exposes the ReleaseApi trait consumed by the release router.

mod client;
mod error;
mod models;

pub use client::FleetClient;
pub use error::{FleetError, FleetErrorKind};
pub use models::{
    Fleet, LegacyDeployRequest, Release, ReleaseId, ReleaseRequest, TargetCapabilities, User,
};

use async_trait::async_trait;

/// The two release-creation protocols, as one seam. The router picks which
/// methods to call; implementations own transport and authentication.
#[async_trait]
pub trait ReleaseApi: Send + Sync {
    /// Legacy single-image deploy. Returns the new release's id; the commit
    /// requires a follow-up `get_release`.
    async fn deploy_legacy(&self, request: &LegacyDeployRequest) -> Result<ReleaseId, FleetError>;

    /// Resolve a release id into the full release record.
    async fn get_release(&self, id: ReleaseId) -> Result<Release, FleetError>;

    /// Modern multi-container release creation. Returns the release,
    /// commit included, in one round-trip.
    async fn create_release(&self, request: &ReleaseRequest) -> Result<Release, FleetError>;
}
