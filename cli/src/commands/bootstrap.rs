//! Bootstrap command implementation

use crate::output;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug, Default)]
pub struct BootstrapArgs {
    /// Runtime shared library (default: ./build/libpython3.10.so)
    #[arg(short, long)]
    pub library: Option<PathBuf>,

    /// Configuration file (default: ./libcsv.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn run(args: BootstrapArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref(), args.library.as_deref())?;
    debug!("Runtime configuration: {:?}", config.runtime);

    let argv0 = std::env::args_os().next();
    let report = libcsv_runtime::run(&config.runtime, argv0).context("Bootstrap failed")?;

    if report.lifecycle.finalize_status != 0 {
        output::warning(&format!(
            "Interpreter finalization returned {}",
            report.lifecycle.finalize_status
        ));
    }

    output::success(&format!(
        "Registered {} from {}",
        report.lifecycle.modules.join(", "),
        report.library_path.display()
    ));
    Ok(())
}
