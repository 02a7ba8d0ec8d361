//! Shape command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use ocompute_core::domain::shape::Shape;

use super::connect;
use crate::config::Config;
use crate::output::table::Table;

/// Shape subcommands
#[derive(Subcommand)]
pub enum ShapeCommands {
    /// List available shapes
    List,
}

/// Handle shape commands
pub async fn handle_shape_command(command: ShapeCommands, config: &Config) -> Result<()> {
    match command {
        ShapeCommands::List => list_shapes(config).await,
    }
}

async fn list_shapes(config: &Config) -> Result<()> {
    let client = connect(config).await?;
    let shapes = client.list_shapes().await?;

    if shapes.is_empty() {
        println!("{}", "No shapes found.".yellow());
    } else {
        print!("{}", shape_table(&shapes).render());
    }

    Ok(())
}

fn shape_table(shapes: &[Shape]) -> Table {
    let mut table = Table::new(&["Shape Name", "CPUs", "RAM", "I/O"]);
    for shape in shapes {
        table.add_row(vec![
            shape.name.as_str().into(),
            shape.cpus.to_string().into(),
            shape.ram.to_string().into(),
            shape.io.to_string().into(),
        ]);
    }
    table.sort_by_column(0);
    table
}
