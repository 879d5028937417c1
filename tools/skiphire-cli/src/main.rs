//! Skiphire CLI - browse skip offerings and pick one.
//!
//! Commands:
//! - `skiphire list` - Show the filtered catalog
//! - `skiphire select` - Put a skip in the cart and continue the booking
//! - `skiphire config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, ListArgs, SelectArgs};

/// Skiphire - choose a skip for your project
#[derive(Parser)]
#[command(name = "skiphire")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List skips matching the given filters
    List(ListArgs),

    /// Select a skip and continue to the next booking step
    Select(SelectArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.verbose, cli.json)?;

    logging::init(cli.verbose, ctx.log_format());

    // Execute command
    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Select(args) => commands::select::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
