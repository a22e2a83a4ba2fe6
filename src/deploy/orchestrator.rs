// ABOUTME: Deploy orchestrator: validate, prune, build, reconcile, route, report.
// ABOUTME: Owns the single success/failure narrative; buffered build logs flush on failure.

use super::error::DeployError;
use super::prune::prune_composition;
use super::reconcile::reconcile_records;
use super::release::{ReleaseStrategy, submit_release};
use crate::build::{BuildRequest, ImageBuilder, ImageRecord};
use crate::fleet::{Fleet, ReleaseApi, User};
use crate::output::Output;
use crate::project::Project;
use crate::runtime::Engine;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-deploy knobs, all off by default.
#[derive(Debug, Default, Clone)]
pub struct DeployOptions {
    /// Build every service, probing nothing.
    pub force_rebuild: bool,
    /// Build through emulation for the fleet's architecture.
    pub emulated: bool,
    /// Do not attach build logs to the release.
    pub suppress_log_upload: bool,
    /// Opaque options handed through to the build subsystem.
    pub build_options: BTreeMap<String, String>,
}

/// Terminal result of a successful deploy.
#[derive(Debug, Serialize)]
pub struct DeployOutcome {
    pub commit: String,
    pub records: Vec<ImageRecord>,
}

/// Top-level coordinator. Holds the three collaborators as injected seams;
/// each `deploy` call is a single pass over one request.
pub struct Deployer<'a> {
    engine: &'a dyn Engine,
    builder: &'a dyn ImageBuilder,
    api: &'a dyn ReleaseApi,
}

impl<'a> Deployer<'a> {
    pub fn new(
        engine: &'a dyn Engine,
        builder: &'a dyn ImageBuilder,
        api: &'a dyn ReleaseApi,
    ) -> Self {
        Self {
            engine,
            builder,
            api,
        }
    }

    /// Run the full deploy sequence. Any stage error aborts the remaining
    /// stages; build logs buffered so far are flushed first so the failure
    /// report keeps its context.
    pub async fn deploy(
        &self,
        project: &Project,
        fleet: &Fleet,
        user: &User,
        options: &DeployOptions,
        output: &Output,
    ) -> Result<DeployOutcome, DeployError> {
        let mut deferred_logs = Vec::new();

        let result = self
            .run(project, fleet, user, options, output, &mut deferred_logs)
            .await;

        if result.is_err() {
            output.flush_build_logs(&deferred_logs);
        }

        result
    }

    async fn run(
        &self,
        project: &Project,
        fleet: &Fleet,
        user: &User,
        options: &DeployOptions,
        output: &Output,
        deferred_logs: &mut Vec<String>,
    ) -> Result<DeployOutcome, DeployError> {
        validate_capabilities(project, fleet)?;
        let strategy = ReleaseStrategy::for_capabilities(&fleet.capabilities);

        output.progress(&format!(
            "  → Checking local images for {} service(s)...",
            project.descriptors.len()
        ));
        let (pruned, skipped) =
            prune_composition(self.engine, &project.composition, options.force_rebuild).await;

        for service in &skipped {
            output.progress(&format!("  → {service}: image exists, skipping build"));
        }

        let built = if pruned.is_empty() {
            output.progress("  → All images exist locally; nothing to build");
            BTreeMap::new()
        } else {
            output.progress(&format!(
                "  → Building {} service(s)...",
                pruned.len()
            ));
            self.builder
                .build(&BuildRequest {
                    composition: &pruned,
                    source: &project.source,
                    project_name: &project.name,
                    arch: &fleet.arch,
                    device_type: &fleet.device_type,
                    emulated: options.emulated,
                    options: options.build_options.clone(),
                })
                .await?
        };

        let records = reconcile_records(&project.descriptors, built)?;

        for record in &records {
            deferred_logs.push(format!("[{}]\n{}", record.service_name, record.logs));
        }

        output.progress("  → Creating release...");
        let release = submit_release(
            self.api,
            strategy,
            fleet,
            user,
            project,
            &records,
            options.suppress_log_upload,
        )
        .await?;

        Ok(DeployOutcome {
            commit: release.commit,
            records,
        })
    }
}

/// Reject impossible deploys before any probe, build, or network call.
fn validate_capabilities(project: &Project, fleet: &Fleet) -> Result<(), DeployError> {
    if project.descriptors.is_empty() {
        return Err(DeployError::EmptyProject);
    }

    if project.descriptors.len() > 1 {
        if fleet.capabilities.is_legacy {
            return Err(DeployError::LegacyMultiService {
                fleet: fleet.slug.clone(),
                count: project.descriptors.len(),
            });
        }
        if !fleet.capabilities.supports_multicontainer {
            return Err(DeployError::MulticontainerNotSupported {
                fleet: fleet.slug.clone(),
                count: project.descriptors.len(),
            });
        }
    }

    Ok(())
}
