//! Orchestration command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use ocompute_client::OrchestrationHandle;
use ocompute_core::domain::orchestration::Orchestration;

use super::{at_least_one_id, confirmer, connect, single_id};
use crate::config::Config;
use crate::output::summary::{instance_summary, orchestration_summary};
use crate::output::table::{Cell, Table};
use crate::output::terminal::{TerminalReporter, format_summary};
use crate::service::lifecycle::Lifecycle;

/// Orchestration subcommands
#[derive(Subcommand)]
pub enum OrchestrationCommands {
    /// List all orchestrations
    List,
    /// Show an orchestration and its instances
    Show {
        /// Orchestration ID
        ids: Vec<String>,
    },
    /// Stop and delete orchestrations along with their instances
    Delete {
        /// Orchestration IDs
        ids: Vec<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle orchestration commands
///
/// Routes orchestration subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The orchestration command to execute
/// * `config` - The CLI configuration
pub async fn handle_orchestration_command(
    command: OrchestrationCommands,
    config: &Config,
) -> Result<()> {
    match command {
        OrchestrationCommands::List => list_orchestrations(config).await,
        OrchestrationCommands::Show { ids } => {
            let id = single_id(
                ids,
                "You must supply an Orchestration ID for an orchestration to display.",
                "You may only supply one Orchestration ID.",
            )?;
            show_orchestration(config, &id).await
        }
        OrchestrationCommands::Delete { ids, yes } => {
            let ids = at_least_one_id(
                ids,
                "You must supply at least one Orchestration ID to delete.",
            )?;
            delete_orchestrations(config, &ids, yes).await
        }
    }
}

/// List all orchestrations
async fn list_orchestrations(config: &Config) -> Result<()> {
    let client = connect(config).await?;
    let orchestrations = client.list_orchestrations().await?;

    if orchestrations.is_empty() {
        println!("{}", "No orchestrations found.".yellow());
    } else {
        print!("{}", orchestration_table(&orchestrations).render());
    }

    Ok(())
}

/// Show one orchestration followed by each of its instances
async fn show_orchestration(config: &Config, id: &str) -> Result<()> {
    let client = connect(config).await?;
    let orchestration = OrchestrationHandle::fetch(&client, id).await?;
    let instances = orchestration.instances().await?;

    print!(
        "{}",
        format_summary(
            Some("Orchestration Summary"),
            &orchestration_summary(orchestration.snapshot())
        )
    );
    for instance in &instances {
        println!();
        print!(
            "{}",
            format_summary(
                Some(&format!("Instance {}", instance.id())),
                &instance_summary(instance)
            )
        );
    }

    Ok(())
}

/// Delete orchestrations one after another, each confirmed separately
async fn delete_orchestrations(config: &Config, ids: &[String], assume_yes: bool) -> Result<()> {
    let client = connect(config).await?;
    let mut reporter = TerminalReporter::new();
    let mut lifecycle = Lifecycle::new(
        &client,
        confirmer(assume_yes),
        &mut reporter,
        config.poll_settings(),
    );

    lifecycle.delete_orchestrations(ids).await?;
    Ok(())
}

fn orchestration_table(orchestrations: &[Orchestration]) -> Table {
    let mut table = Table::new(&[
        "Orchestration ID",
        "Description",
        "Status",
        "Instance Count",
    ]);

    for orchestration in orchestrations {
        table.add_row(vec![
            orchestration.id().into(),
            orchestration.description.clone().unwrap_or_default().into(),
            Cell::status(orchestration.status.as_str()),
            orchestration.instance_count.to_string().into(),
        ]);
    }

    table.sort_by_column(0);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkflowError;

    fn orchestration(id: &str, status: &str) -> Orchestration {
        Orchestration {
            name: format!("/Compute-acme/{}", id),
            description: Some(format!("{} via ocompute", id)),
            status: status.to_string(),
            instance_count: 1,
        }
    }

    #[test]
    fn test_orchestration_table_sorted_by_id() {
        colored::control::set_override(false);

        let table = orchestration_table(&[
            orchestration("jdoe/web01", "ready"),
            orchestration("jdoe/db01", "stopped"),
        ]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Orchestration ID"));
        assert!(lines[1].starts_with("jdoe/db01 "));
        assert!(lines[1].contains("stopped"));
        assert!(lines[2].starts_with("jdoe/web01"));
        assert!(lines[2].ends_with("1"));
    }

    #[tokio::test]
    async fn test_delete_requires_an_id() {
        let err = handle_orchestration_command(
            OrchestrationCommands::Delete {
                ids: vec![],
                yes: true,
            },
            &Config::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "You must supply at least one Orchestration ID to delete."
        );
        assert!(matches!(
            err.downcast_ref::<WorkflowError>(),
            Some(WorkflowError::InvalidArguments(_))
        ));
    }

    #[tokio::test]
    async fn test_show_accepts_only_one_id() {
        let err = handle_orchestration_command(
            OrchestrationCommands::Show {
                ids: vec!["a".to_string(), "b".to_string()],
            },
            &Config::default(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "You may only supply one Orchestration ID.");
    }
}
