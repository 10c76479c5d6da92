//! Opens input sources and hands them to a transform strategy

use crate::error::{ProcessError, Result};
use crate::transformer::{TransformStrategy, TransformedData};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;
use tracing::debug;

/// Reads CSV input from files or memory through a [`TransformStrategy`].
#[derive(Debug, Clone)]
pub struct Ingestor<S> {
    strategy: S,
}

impl<S: TransformStrategy> Ingestor<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Open `path` and transform it lazily. Rows are read as they are pulled.
    pub fn transform_file_data_lazy(&self, path: &Path) -> Result<TransformedData<'_>> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProcessError::FileNotFound(path.to_path_buf()),
            _ => ProcessError::Io(e),
        })?;
        debug!("Reading CSV from {}", path.display());

        self.strategy.transform_reader(BufReader::new(file))
    }

    /// Transform text already held in memory.
    pub fn read_data_in_memory<'a>(&'a self, data: &'a str) -> TransformedData<'a> {
        self.strategy.transform_data(data)
    }
}
