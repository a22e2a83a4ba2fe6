// ABOUTME: Deploy command implementation.
// ABOUTME: Validates arguments, loads the project, and hands off to the orchestrator.

use crate::cli::DeployArgs;
use stevedore::build::EngineBuilder;
use stevedore::deploy::{DeployOptions, Deployer};
use stevedore::error::{Error, Result};
use stevedore::fleet::FleetClient;
use stevedore::output::{Output, OutputMode};
use stevedore::project::Project;
use stevedore::runtime::DockerEngine;
use stevedore::types::ImageRef;
use std::collections::BTreeMap;

/// Deploy a project (or a single prebuilt image) to a fleet.
pub async fn deploy(args: DeployArgs) -> Result<()> {
    // Validation errors come before any build or network activity.
    if args.image.is_some() && args.build {
        return Err(Error::ImageWithBuild);
    }

    let token = args
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or(Error::MissingToken)?;

    let mode = if args.json {
        OutputMode::Json
    } else if args.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);
    output.start_timer();

    let image = args.image.as_deref().map(ImageRef::parse).transpose()?;
    let project = Project::load(&args.source, args.project_name.as_deref(), image)?;

    output.progress(&format!("Deploying {} to fleet {}", project, args.fleet));

    let client = FleetClient::new(&args.api_url, token)?;

    // Fleet metadata and user identity are independent lookups; fetch them
    // together before routing.
    let (fleet, user) = tokio::try_join!(client.get_fleet(&args.fleet), client.whoami())?;
    output.progress(&format!(
        "  → Target fleet {} ({}, {})",
        fleet.slug, fleet.arch, fleet.device_type
    ));

    let engine = DockerEngine::connect(args.docker.as_deref())?;
    let builder = EngineBuilder::new(&engine);
    let deployer = Deployer::new(&engine, &builder, &client);

    let options = DeployOptions {
        force_rebuild: args.build,
        emulated: args.emulated,
        suppress_log_upload: args.no_log_upload,
        build_options: BTreeMap::new(),
    };

    let outcome = deployer
        .deploy(&project, &fleet, &user, &options, &output)
        .await?;

    output.result(&outcome.commit, &outcome);
    output.success(&format!(
        "  ✓ Release {} deployed to {}",
        outcome.commit, fleet.slug
    ));

    Ok(())
}
