// ABOUTME: Composition pruner: drop services whose images already exist locally.
// ABOUTME: Probes run as a bounded concurrent fan-out; a probe failure never cancels siblings.

use super::probe::{ProbeResult, probe_image};
use crate::project::Composition;
use crate::runtime::Engine;
use crate::types::ServiceName;
use futures::StreamExt;
use futures::stream;
use std::collections::BTreeSet;

/// Concurrent probe limit. Keeps a large composition from flooding the
/// daemon with inspect calls.
pub const PROBE_FAN_OUT: usize = 4;

/// Reduce a composition to the services that must be built. Returns the
/// pruned composition and the names that were skipped.
///
/// With `force_rebuild` set, no probes are issued and the composition comes
/// back unchanged. An empty pruned composition is a valid terminal state
/// (everything already exists), not an error.
pub async fn prune_composition(
    engine: &dyn Engine,
    composition: &Composition,
    force_rebuild: bool,
) -> (Composition, BTreeSet<ServiceName>) {
    if force_rebuild {
        return (composition.clone(), BTreeSet::new());
    }

    // Build-spec services are probed by their resolved tag, plain services
    // by their image reference. Completion order is irrelevant; only the
    // final set matters.
    let existing: BTreeSet<ServiceName> = stream::iter(composition.services.iter())
        .map(|(name, spec)| async move {
            match probe_image(engine, spec.reference()).await {
                ProbeResult::Found => Some(name.clone()),
                ProbeResult::NotFound => None,
            }
        })
        .buffer_unordered(PROBE_FAN_OUT)
        .filter_map(|found| async move { found })
        .collect()
        .await;

    (composition.without_services(&existing), existing)
}
