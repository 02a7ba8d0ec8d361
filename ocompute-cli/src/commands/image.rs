//! Image command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use ocompute_core::domain::image::ImageList;

use super::connect;
use crate::config::Config;
use crate::output::table::Table;

/// Image subcommands
#[derive(Subcommand)]
pub enum ImageCommands {
    /// List the account's image lists and the public ones
    List,
}

/// Handle image commands
pub async fn handle_image_command(command: ImageCommands, config: &Config) -> Result<()> {
    match command {
        ImageCommands::List => list_images(config).await,
    }
}

async fn list_images(config: &Config) -> Result<()> {
    let client = connect(config).await?;
    let images = client.list_images().await?;

    if images.is_empty() {
        println!("{}", "No images found.".yellow());
    } else {
        print!("{}", image_table(&images).render());
    }

    Ok(())
}

fn image_table(images: &[ImageList]) -> Table {
    let mut table = Table::new(&["Image Name", "Description"]);
    for image in images {
        table.add_row(vec![
            image.display_name().into(),
            image.description.clone().unwrap_or_default().into(),
        ]);
    }
    table.sort_by_column(0);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_table() {
        colored::control::set_override(false);

        let table = image_table(&[
            ImageList {
                name: "/oracle/public/oel_6.6_20GB".to_string(),
                description: Some("Oracle Linux 6.6".to_string()),
            },
            ImageList {
                name: "/Compute-acme/jdoe/centos7".to_string(),
                description: None,
            },
        ]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[1].starts_with("/oracle/public/oel_6.6_20GB"));
        assert!(lines[1].ends_with("Oracle Linux 6.6"));
        assert!(lines[2].starts_with("jdoe/centos7 "));
    }
}
