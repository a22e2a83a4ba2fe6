// ABOUTME: Deploy orchestration engine: probe, prune, build, reconcile, route.
// ABOUTME: Single pass per deploy request; any stage error unwinds the whole run.

mod error;
mod orchestrator;
mod probe;
mod prune;
mod reconcile;
mod release;

pub use error::DeployError;
pub use orchestrator::{DeployOptions, DeployOutcome, Deployer};
pub use probe::{ProbeResult, probe_image};
pub use prune::{PROBE_FAN_OUT, prune_composition};
pub use reconcile::{SKIP_LOGS, reconcile_records};
pub use release::{ReleaseStrategy, submit_release};
