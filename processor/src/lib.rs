//! CSV processing pipeline
//!
//! The four stages registered with the embedded runtime, implemented natively:
//! - `lexer`: field and line tokenization
//! - `filter`: row filters parsed from `header<op>value` definitions
//! - `processor`: lazy application of a filter to a row stream
//! - `serializer`: column projection and CSV output
//!
//! [`process_csv`] and [`process_csv_file`] wire them together.

pub mod comparison;
pub mod error;
pub mod filter;
pub mod ingestor;
pub mod lexer;
pub mod processor;
pub mod serializer;
pub mod transformer;

pub use error::{ProcessError, Result};
pub use filter::Filter;
pub use ingestor::Ingestor;
pub use lexer::Lexer;
pub use processor::{ProcessedData, Processor};
pub use serializer::{ColumnSelection, Serializer};
pub use transformer::{CsvTransformStrategy, TransformStrategy, TransformedData};

use libcsv_shared::ProcessorConfig;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

/// Outcome of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Rows written after filtering (header line excluded)
    pub rows_written: usize,

    /// Number of parsed filter comparisons
    pub comparisons: usize,
}

/// Filter and project in-memory CSV text, writing the result to `out`.
///
/// Output is written only once the whole result is ready; on error `out` is
/// left untouched.
pub fn process_csv<W: Write>(
    csv_data: &str,
    selected_columns: &str,
    row_filter_definitions: &str,
    config: &ProcessorConfig,
    out: &mut W,
) -> Result<ProcessSummary> {
    let ingestor = Ingestor::new(CsvTransformStrategy::from_config(config)?);
    let data = ingestor.read_data_in_memory(csv_data);
    run_pipeline(data, selected_columns, row_filter_definitions, ingestor.strategy(), out)
}

/// Filter and project CSV read from `reader` (one record per line).
pub fn process_csv_reader<R: BufRead, W: Write>(
    reader: R,
    selected_columns: &str,
    row_filter_definitions: &str,
    config: &ProcessorConfig,
    out: &mut W,
) -> Result<ProcessSummary> {
    let strategy = CsvTransformStrategy::from_config(config)?;
    let data = strategy.transform_reader(reader)?;
    run_pipeline(data, selected_columns, row_filter_definitions, &strategy, out)
}

/// Filter and project the CSV file at `csv_file_path`.
pub fn process_csv_file<W: Write>(
    csv_file_path: &Path,
    selected_columns: &str,
    row_filter_definitions: &str,
    config: &ProcessorConfig,
    out: &mut W,
) -> Result<ProcessSummary> {
    let ingestor = Ingestor::new(CsvTransformStrategy::from_config(config)?);
    let data = ingestor.transform_file_data_lazy(csv_file_path)?;
    run_pipeline(data, selected_columns, row_filter_definitions, ingestor.strategy(), out)
}

fn run_pipeline<W: Write>(
    data: TransformedData<'_>,
    selected_columns: &str,
    row_filter_definitions: &str,
    strategy: &CsvTransformStrategy,
    out: &mut W,
) -> Result<ProcessSummary> {
    debug!("Input has {} column(s)", data.headers.len());

    let filter = Filter::new(row_filter_definitions, &data.headers)?;
    let comparisons = filter.comparison_count();

    // Nothing reaches `out` unless every row serialized.
    let processed = Processor::new(data, filter).build_lazy();
    let mut buffer = Vec::new();
    let rows_written = Serializer::new(processed, strategy.lexer().clone())
        .write(selected_columns, &mut buffer)?;
    out.write_all(&buffer)?;

    debug!("Wrote {} row(s) using {} comparison(s)", rows_written, comparisons);

    Ok(ProcessSummary {
        rows_written,
        comparisons,
    })
}
