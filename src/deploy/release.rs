// ABOUTME: Release router: legacy single-image vs modern multi-container protocol.
// ABOUTME: The strategy is selected once from capability flags and never re-entered.

use super::error::DeployError;
use crate::build::ImageRecord;
use crate::fleet::{
    Fleet, LegacyDeployRequest, Release, ReleaseApi, ReleaseRequest, TargetCapabilities, User,
};
use crate::project::Project;

/// Which release-creation protocol a deploy uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStrategy {
    /// Single-image protocol for fleets predating multi-container support.
    /// The commit token requires a follow-up release lookup.
    Legacy,

    /// One release-creation request carrying the composition and every
    /// image record; the commit comes back directly.
    Multicontainer,
}

impl ReleaseStrategy {
    /// Determine the protocol from the fleet's capability flags. A legacy
    /// fleet always takes the legacy path regardless of service count.
    pub fn for_capabilities(capabilities: &TargetCapabilities) -> Self {
        if capabilities.is_legacy {
            ReleaseStrategy::Legacy
        } else {
            ReleaseStrategy::Multicontainer
        }
    }
}

/// Submit the assembled image set through the selected protocol. One-shot:
/// failures surface without retry, and the remote service owns atomicity.
pub async fn submit_release(
    api: &dyn ReleaseApi,
    strategy: ReleaseStrategy,
    fleet: &Fleet,
    user: &User,
    project: &Project,
    records: &[ImageRecord],
    suppress_log_upload: bool,
) -> Result<Release, DeployError> {
    match strategy {
        ReleaseStrategy::Legacy => {
            // The capability gate rejects multi-service projects on legacy
            // fleets before any build; more than one record here is an
            // internal consistency failure.
            let record = match records {
                [record] => record,
                _ => {
                    return Err(DeployError::RecordCount {
                        expected: 1,
                        actual: records.len(),
                    });
                }
            };

            let build_logs = (!suppress_log_upload).then(|| record.logs.clone());
            let release_id = api
                .deploy_legacy(&LegacyDeployRequest {
                    fleet: fleet.slug.clone(),
                    username: user.username.clone(),
                    image_name: record.name.clone(),
                    build_logs,
                })
                .await?;

            // The legacy endpoint answers with an id only; resolve the
            // commit with a second round-trip.
            Ok(api.get_release(release_id).await?)
        }
        ReleaseStrategy::Multicontainer => Ok(api
            .create_release(&ReleaseRequest {
                fleet_id: fleet.id,
                user_id: user.id,
                composition: project.composition.clone(),
                images: records.to_vec(),
                suppress_log_upload,
            })
            .await?),
    }
}
