//! CLI command implementations.

pub mod config;
pub mod list;
pub mod select;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use skiphire_core::catalog::LoadState;
use skiphire_data::{shared_session, CatalogLoader, SharedSession};

use crate::context::Context;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only show these sizes (yards). Repeat for several.
    #[arg(short, long = "size")]
    pub sizes: Vec<u32>,

    /// Lowest price in pounds, VAT included.
    #[arg(long)]
    pub min_price: Option<i64>,

    /// Highest price in pounds, VAT included.
    #[arg(long)]
    pub max_price: Option<i64>,

    /// Only skips that need a road permit.
    #[arg(long)]
    pub permit_required: bool,

    /// Only skips that accept heavy waste.
    #[arg(long)]
    pub heavy_waste: bool,

    /// Read the catalog from a JSON file instead of the API.
    #[arg(long)]
    pub catalog_file: Option<String>,
}

/// Arguments for the select command.
#[derive(Args)]
pub struct SelectArgs {
    /// Offering ID. Prompts for one when omitted.
    pub id: Option<i64>,

    /// Read the catalog from a JSON file instead of the API.
    #[arg(long)]
    pub catalog_file: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Write skiphire.json instead of skiphire.toml.
        #[arg(long)]
        as_json: bool,
    },
}

/// Fetch the catalog into a fresh session.
///
/// Fails with the user-facing load message when the fetch fails.
pub async fn load_catalog(ctx: &Context, catalog_file: Option<&str>) -> Result<SharedSession> {
    let source = ctx.catalog_source(catalog_file)?;
    ctx.output.debug(&format!("Catalog source: {}", source.describe()));

    let session = shared_session();
    let loader = CatalogLoader::from_shared(source);

    let spinner = ctx.output.spinner("Loading skips...");
    let outcome = loader
        .spawn(session.clone())
        .await
        .context("Catalog task panicked")?;
    spinner.finish_and_clear();

    if outcome.is_none() {
        bail!("Catalog was not requested");
    }

    {
        let guard = session.lock().await;
        match guard.load_state() {
            LoadState::Failed(failure) => {
                ctx.output.debug(&failure.reason);
                bail!("{}", failure.message);
            }
            LoadState::Ready { offerings, fetched_at } => {
                let local = fetched_at.with_timezone(&chrono::Local);
                ctx.output.debug(&format!(
                    "Loaded {} skips at {}",
                    offerings.len(),
                    local.format("%H:%M:%S")
                ));
            }
            LoadState::Loading => bail!("Catalog is still loading"),
        }
    }

    Ok(session)
}
