//! Server command handlers
//!
//! A server is one instance. `create` always goes through a single-instance
//! orchestration; `delete` only removes standalone instances.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::*;
use ocompute_client::ComputeClient;
use ocompute_core::domain::identity::{IdentityDomain, strip_container};
use ocompute_core::domain::instance::Instance;
use ocompute_core::dto::instance::PublicIp;

use super::{confirmer, connect, single_id};
use crate::config::Config;
use crate::error::WorkflowError;
use crate::output::summary::{NONE, SummaryRow, instance_summary};
use crate::output::table::{Cell, Table};
use crate::output::terminal::{TerminalReporter, format_summary};
use crate::service::lifecycle::{Lifecycle, ServerSpec};
use crate::service::prompt::StdinConfirm;

/// Server subcommands
#[derive(Subcommand)]
pub enum ServerCommands {
    /// Create a server through a new orchestration
    Create(CreateArgs),
    /// Delete a standalone server
    Delete {
        /// Instance ID
        ids: Vec<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show server details
    Show {
        /// Instance ID
        ids: Vec<String>,
    },
    /// List all servers
    List,
}

/// Arguments of `server create`
#[derive(Args, Debug, Clone, Default)]
pub struct CreateArgs {
    /// Name of the orchestration and of its instance
    #[arg(long)]
    pub hostname: Option<String>,

    /// Shape to launch (see `shape list`)
    #[arg(long)]
    pub shape: Option<String>,

    /// Image list to boot from (see `image list`)
    #[arg(long)]
    pub image: Option<String>,

    /// Public IP: `pool` for the shared pool, otherwise a reservation name
    #[arg(long)]
    pub public_ip: Option<String>,

    /// Display label (defaults to the hostname)
    #[arg(long)]
    pub label: Option<String>,

    /// SSH key names, relative to the identity domain
    #[arg(long, value_delimiter = ',')]
    pub sshkeys: Vec<String>,

    /// Node name to report for bootstrapping (defaults to the instance ID)
    #[arg(long)]
    pub node_name: Option<String>,
}

impl CreateArgs {
    /// Validate the arguments into a server spec
    ///
    /// # Errors
    /// Returns [`WorkflowError::MissingParameters`] naming every absent
    /// required value.
    pub fn server_spec(&self, identity: &IdentityDomain) -> Result<ServerSpec, WorkflowError> {
        let missing: Vec<&'static str> = [
            ("image", &self.image),
            ("shape", &self.shape),
            ("hostname", &self.hostname),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(WorkflowError::MissingParameters(missing));
        }

        let name = self.hostname.clone().unwrap_or_default();
        Ok(ServerSpec {
            label: self.label.clone().unwrap_or_else(|| name.clone()),
            name,
            shape: self.shape.clone().unwrap_or_default(),
            image: self.image.clone().unwrap_or_default(),
            public_ip: self.public_ip.as_deref().map(PublicIp::parse),
            sshkeys: self.sshkeys.iter().map(|key| identity.prepend(key)).collect(),
        })
    }
}

/// Handle server commands
///
/// Routes server subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The server command to execute
/// * `config` - The CLI configuration
pub async fn handle_server_command(command: ServerCommands, config: &Config) -> Result<()> {
    match command {
        ServerCommands::Create(args) => create_server(config, &args).await,
        ServerCommands::Delete { ids, yes } => {
            let id = single_id(
                ids,
                "You must supply an Instance ID for a server to delete.",
                "You may only supply one Instance ID.",
            )?;
            delete_server(config, &id, yes).await
        }
        ServerCommands::Show { ids } => {
            let id = single_id(
                ids,
                "You must supply an Instance ID for a server to display.",
                "You may only supply one Instance ID.",
            )?;
            show_server(config, &id).await
        }
        ServerCommands::List => list_servers(config).await,
    }
}

/// Create a server and print where to bootstrap it
async fn create_server(config: &Config, args: &CreateArgs) -> Result<()> {
    // validate before touching the network
    let settings = config.connection_settings()?;
    let spec = args.server_spec(&settings.identity)?;

    let client = connect(config).await?;
    let mut reporter = TerminalReporter::new();
    let mut lifecycle = Lifecycle::new(&client, &StdinConfirm, &mut reporter, config.poll_settings());
    let instance = lifecycle.create_server(&spec).await?;

    println!();
    print!(
        "{}",
        format_summary(
            Some("Bootstrap"),
            &bootstrap_rows(&instance, spec.public_ip.is_some(), args.node_name.as_deref()),
        )
    );

    Ok(())
}

/// Address and node name for bootstrapping a freshly created server
///
/// The first public IP is used when one was requested, the private IP
/// otherwise.
fn bootstrap_rows(instance: &Instance, public_ip: bool, node_name: Option<&str>) -> Vec<SummaryRow> {
    let address = if public_ip {
        instance.public_ip_addresses.first().map(String::as_str)
    } else {
        instance.ip_address.as_deref()
    };

    vec![
        ("Bootstrap Address", address.unwrap_or(NONE).to_string()),
        ("Node Name", node_name.unwrap_or(instance.id()).to_string()),
    ]
}

/// Delete a standalone server after confirmation
async fn delete_server(config: &Config, id: &str, assume_yes: bool) -> Result<()> {
    let client = connect(config).await?;
    let mut reporter = TerminalReporter::new();
    let mut lifecycle = Lifecycle::new(
        &client,
        confirmer(assume_yes),
        &mut reporter,
        config.poll_settings(),
    );

    lifecycle.delete_server(id).await?;
    Ok(())
}

/// Show a single server
async fn show_server(config: &Config, id: &str) -> Result<()> {
    let client = connect(config).await?;
    let instance = client.get_instance(id).await?;

    print!(
        "{}",
        format_summary(
            Some(&format!("Instance {}", instance.id())),
            &instance_summary(&instance)
        )
    );
    Ok(())
}

/// List all servers
async fn list_servers(config: &Config) -> Result<()> {
    let client: ComputeClient = connect(config).await?;
    let instances = client.list_instances().await?;

    if instances.is_empty() {
        println!("{}", "No servers found.".yellow());
    } else {
        print!("{}", server_table(&instances).render());
    }

    Ok(())
}

fn server_table(instances: &[Instance]) -> Table {
    let mut table = Table::new(&[
        "Hostname",
        "Status",
        "Shape",
        "Image",
        "Instance ID",
        "Orchestration ID",
    ]);

    for instance in instances {
        table.add_row(vec![
            instance.hostname.as_deref().unwrap_or(NONE).into(),
            Cell::status(instance.status.as_str()),
            instance.shape.as_deref().unwrap_or(NONE).into(),
            instance.image.as_deref().unwrap_or(NONE).into(),
            instance.id().into(),
            instance
                .orchestration
                .as_deref()
                .map(strip_container)
                .unwrap_or(NONE)
                .into(),
        ]);
    }

    table.sort_by_column(4);
    table
}
