//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod image;
mod orchestration;
mod server;
mod shape;

pub use image::ImageCommands;
pub use orchestration::OrchestrationCommands;
pub use server::ServerCommands;
pub use shape::ShapeCommands;

use anyhow::{Context, Result};
use clap::Subcommand;
use ocompute_client::ComputeClient;

use crate::config::Config;
use crate::error::WorkflowError;
use crate::service::prompt::{AssumeYes, Confirm, StdinConfirm};

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Server (instance) management
    Server {
        #[command(subcommand)]
        command: ServerCommands,
    },
    /// Orchestration management
    Orchestration {
        #[command(subcommand)]
        command: OrchestrationCommands,
    },
    /// Image lists available to the account
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Instance shapes
    Shape {
        #[command(subcommand)]
        command: ShapeCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Server { command } => server::handle_server_command(command, config).await,
        Commands::Orchestration { command } => {
            orchestration::handle_orchestration_command(command, config).await
        }
        Commands::Image { command } => image::handle_image_command(command, config).await,
        Commands::Shape { command } => shape::handle_shape_command(command, config).await,
    }
}

/// Open an authenticated API session
async fn connect(config: &Config) -> Result<ComputeClient> {
    let settings = config.connection_settings()?;
    let api_url = settings.api_url.clone();

    let client = ComputeClient::new(settings).context("Failed to build HTTP client")?;
    client
        .authenticate()
        .await
        .with_context(|| format!("Failed to authenticate against {}", api_url))?;

    Ok(client)
}

/// Confirmation source for destructive commands
fn confirmer(assume_yes: bool) -> &'static dyn Confirm {
    if assume_yes { &AssumeYes } else { &StdinConfirm }
}

/// Exactly one identifier
fn single_id(
    ids: Vec<String>,
    missing: &str,
    too_many: &str,
) -> std::result::Result<String, WorkflowError> {
    let mut ids = ids.into_iter();
    match (ids.next(), ids.next()) {
        (None, _) => Err(WorkflowError::InvalidArguments(missing.to_string())),
        (Some(id), None) => Ok(id),
        (Some(_), Some(_)) => Err(WorkflowError::InvalidArguments(too_many.to_string())),
    }
}

/// One or more identifiers
fn at_least_one_id(
    ids: Vec<String>,
    missing: &str,
) -> std::result::Result<Vec<String>, WorkflowError> {
    if ids.is_empty() {
        Err(WorkflowError::InvalidArguments(missing.to_string()))
    } else {
        Ok(ids)
    }
}
