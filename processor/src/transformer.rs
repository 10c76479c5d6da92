//! Turns raw CSV text into headers plus a lazy row stream

use crate::error::Result;
use crate::lexer::{lines_split_lazy, Lexer};
use libcsv_shared::{Headers, ProcessorConfig, Row};
use std::io::BufRead;

/// Lazily produced rows. IO failures surface in order.
pub type RowIter<'a> = Box<dyn Iterator<Item = Result<Row>> + 'a>;

/// Output of a [`TransformStrategy`]
pub struct TransformedData<'a> {
    pub headers: Headers,
    pub rows: RowIter<'a>,
}

impl std::fmt::Debug for TransformedData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformedData")
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// How an input source is split into headers and rows
pub trait TransformStrategy {
    /// Transform in-memory text. Lines are tokenized verbatim.
    fn transform_data<'a>(&'a self, data: &'a str) -> TransformedData<'a>;

    /// Transform a line-oriented reader. Each line is trimmed before tokenizing.
    fn transform_reader<'a, R>(&'a self, reader: R) -> Result<TransformedData<'a>>
    where
        R: BufRead + 'a;
}

/// CSV strategy: first line holds the headers, every other line a record.
#[derive(Debug, Clone)]
pub struct CsvTransformStrategy {
    lexer: Lexer,
    line_delimiter: String,
}

impl CsvTransformStrategy {
    pub fn new(field_delimiter: &str, line_delimiter: &str) -> Result<Self> {
        Ok(Self {
            lexer: Lexer::new(field_delimiter)?,
            line_delimiter: line_delimiter.to_string(),
        })
    }

    pub fn from_config(config: &ProcessorConfig) -> Result<Self> {
        Self::new(&config.field_delimiter, &config.line_delimiter)
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }
}

impl TransformStrategy for CsvTransformStrategy {
    fn transform_data<'a>(&'a self, data: &'a str) -> TransformedData<'a> {
        let mut lines = lines_split_lazy(data, &self.line_delimiter);
        let headers = self.lexer.tokenize(lines.next().unwrap_or_default());

        let rows = lines.map(move |line| -> Result<Row> { Ok(self.lexer.tokenize(line)) });

        TransformedData {
            headers,
            rows: Box::new(rows),
        }
    }

    fn transform_reader<'a, R>(&'a self, mut reader: R) -> Result<TransformedData<'a>>
    where
        R: BufRead + 'a,
    {
        let mut header_line = String::new();
        reader.read_line(&mut header_line)?;
        let headers = self.lexer.tokenize(header_line.trim());

        let rows = reader.lines().map(move |line| -> Result<Row> {
            let line = line?;
            Ok(self.lexer.tokenize(line.trim()))
        });

        Ok(TransformedData {
            headers,
            rows: Box::new(rows),
        })
    }
}
