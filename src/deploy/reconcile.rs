// ABOUTME: Result reconciler: merge build output with skip records.
// ABOUTME: Exactly one ImageRecord per declared service, no duplicates, no omissions.

use super::error::DeployError;
use crate::build::ImageRecord;
use crate::project::ServiceDescriptor;
use crate::types::ServiceName;
use std::collections::BTreeMap;

/// Fixed log text carried by records whose build was skipped.
pub const SKIP_LOGS: &str = "Build skipped; image already exists.";

/// Produce the final record sequence: the builder's record where one exists,
/// a synthesized skip record otherwise.
///
/// A builder record that matches no descriptor violates the coverage
/// invariant and fails the deploy rather than being dropped silently.
pub fn reconcile_records(
    descriptors: &[ServiceDescriptor],
    mut built: BTreeMap<ServiceName, ImageRecord>,
) -> Result<Vec<ImageRecord>, DeployError> {
    let mut records = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        let record = match built.remove(&descriptor.name) {
            Some(record) => record,
            None => ImageRecord {
                service_name: descriptor.name.clone(),
                name: descriptor.image.reference().to_string(),
                logs: SKIP_LOGS.to_string(),
                props: BTreeMap::new(),
            },
        };
        records.push(record);
    }

    if let Some((service, _)) = built.pop_first() {
        return Err(DeployError::UnknownBuildRecord { service });
    }

    Ok(records)
}
