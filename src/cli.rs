// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stevedore")]
#[command(about = "Ship container images to a fleet as a release")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build (if needed) and deploy a project or image to a fleet
    Deploy(DeployArgs),
}

#[derive(Args)]
pub struct DeployArgs {
    /// Fleet slug to deploy to
    pub fleet: String,

    /// Deploy this prebuilt image instead of reading a compose file
    pub image: Option<String>,

    /// Force a rebuild even when images already exist locally
    #[arg(short, long)]
    pub build: bool,

    /// Source directory of the project
    #[arg(short, long, default_value = ".")]
    pub source: PathBuf,

    /// Override the project name (defaults to the source directory name)
    #[arg(long = "projectName")]
    pub project_name: Option<String>,

    /// Build through emulation for the fleet's architecture
    #[arg(short, long)]
    pub emulated: bool,

    /// Do not upload build logs with the release
    #[arg(long = "nologupload")]
    pub no_log_upload: bool,

    /// Container runtime socket (defaults to the platform socket)
    #[arg(long)]
    pub docker: Option<String>,

    /// Fleet API base URL
    #[arg(
        long,
        env = "STEVEDORE_API_URL",
        default_value = "https://api.stevedore.dev"
    )]
    pub api_url: String,

    /// Fleet API token
    #[arg(long, env = "STEVEDORE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Only print the release commit
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit the outcome as a JSON line
    #[arg(long)]
    pub json: bool,
}
