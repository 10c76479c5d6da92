//! Process command implementation

use anyhow::{Context, Result};
use clap::Args;
use libcsv_processor::{process_csv, process_csv_file, process_csv_reader, ProcessSummary};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// CSV file to read (stdin when neither a file nor --data is given)
    #[arg(conflicts_with = "data")]
    pub file: Option<PathBuf>,

    /// CSV text to process instead of a file
    #[arg(short, long)]
    pub data: Option<String>,

    /// Columns to output, comma separated (default: all)
    #[arg(short, long, default_value = "")]
    pub columns: String,

    /// Row filter `header<op>value`; repeat for several (all must match)
    #[arg(short, long = "filter")]
    pub filters: Vec<String>,

    /// Configuration file (default: ./libcsv.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn run(args: ProcessArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref(), None)?;

    let summary = tokio::task::spawn_blocking(move || -> Result<ProcessSummary> {
        let filters = args.filters.join("\n");
        let processor = &config.processor;

        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());

        let summary = match (&args.file, &args.data) {
            (Some(path), _) => process_csv_file(path, &args.columns, &filters, processor, &mut out)
                .with_context(|| format!("Failed to process {}", path.display()))?,
            (None, Some(data)) => process_csv(data, &args.columns, &filters, processor, &mut out)
                .context("Failed to process CSV data")?,
            (None, None) => process_csv_reader(
                io::stdin().lock(),
                &args.columns,
                &filters,
                processor,
                &mut out,
            )
            .context("Failed to process CSV from stdin")?,
        };

        out.flush().context("Failed to write output")?;
        Ok(summary)
    })
    .await
    .context("Processing task failed")??;

    info!(
        "Processed {} row(s) with {} comparison(s)",
        summary.rows_written, summary.comparisons
    );
    Ok(())
}
