//! Command-line interface for the importer.
//!
//! Provides commands for importing a build into a record, previewing the
//! mapped document, listing content libraries, and inspecting the
//! resolved configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::PathbuilderClient;
use crate::config;
use crate::domain::build::BuildId;
use crate::import::{FsRecordStore, Importer};
use crate::library::FsContentStore;

/// pbimport - Pathbuilder build importer
#[derive(Parser, Debug)]
#[command(name = "pbimport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a build into a character record
    Import {
        /// Six-digit build id from the export dialog
        build_id: String,

        /// Target record id
        #[arg(short, long)]
        record: String,
    },

    /// Fetch and map a build without writing anything
    Preview {
        /// Six-digit build id from the export dialog
        build_id: String,
    },

    /// List content libraries present in the content directory
    Packs,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Import { build_id, record } => import_build(&build_id, &record).await,
            Commands::Preview { build_id } => preview_build(&build_id).await,
            Commands::Packs => list_packs().await,
            Commands::Config => show_config(),
        }
    }
}

/// Parse and validate a raw build id argument.
fn parse_build_id(raw: &str) -> Result<BuildId> {
    raw.parse::<BuildId>()
        .context("Build ID must be 6 digits")
}

async fn import_build(raw_id: &str, record_id: &str) -> Result<()> {
    let build_id = parse_build_id(raw_id)?;
    let config = config::config()?;

    let importer = Importer::new(
        PathbuilderClient::new(config.service_url.clone()),
        FsContentStore::new(config.content.clone()),
        FsRecordStore::new(config.records.clone()),
    );

    let report = importer.import(record_id, &build_id).await?;

    println!(
        "Imported '{}' into record {} ({} items)",
        report.build_name, report.record_id, report.items
    );

    Ok(())
}

async fn preview_build(raw_id: &str) -> Result<()> {
    let build_id = parse_build_id(raw_id)?;
    let config = config::config()?;

    let importer = Importer::new(
        PathbuilderClient::new(config.service_url.clone()),
        FsContentStore::new(config.content.clone()),
        FsRecordStore::new(config.records.clone()),
    );

    let document = importer.preview(&build_id).await?;
    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(())
}

async fn list_packs() -> Result<()> {
    let config = config::config()?;
    let store = FsContentStore::new(config.content.clone());

    let libraries = store.list_libraries().await?;
    if libraries.is_empty() {
        println!("No content libraries found in {}", config.content.display());
        return Ok(());
    }

    for name in libraries {
        println!("{name}");
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("home:        {}", config.home.display());
    println!("content:     {}", config.content.display());
    println!("records:     {}", config.records.display());
    println!("service url: {}", config.service_url);
    match &config.config_file {
        Some(path) => println!("config file: {}", path.display()),
        None => println!("config file: (none found)"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_id_rejects_bad_input() {
        assert!(parse_build_id("12345").is_err());
        assert!(parse_build_id("abcdef").is_err());
        assert!(parse_build_id("123456").is_ok());
    }
}
