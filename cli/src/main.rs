//! CLI for libcsv
//!
//! Commands:
//! - bootstrap: load the embedded runtime and run one interpreter lifecycle
//!   (the default when no command is given)
//! - process: filter and project CSV data

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "libcsv")]
#[command(about = "libcsv - CSV filtering with an embedded runtime host", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the runtime library and register the built-in modules
    Bootstrap(commands::bootstrap::BootstrapArgs),

    /// Filter rows and select columns of CSV data
    Process(commands::process::ProcessArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Process(args)) => {
            init_tracing(args.verbose);
            commands::process::run(args).await
        }
        Some(Commands::Bootstrap(args)) => {
            init_tracing(args.verbose);
            commands::bootstrap::run(args).await
        }
        None => {
            init_tracing(false);
            commands::bootstrap::run(commands::bootstrap::BootstrapArgs::default()).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // stdout carries command output
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
