//! Applies a row filter to transformed data without buffering rows

use crate::filter::Filter;
use crate::transformer::{RowIter, TransformedData};
use libcsv_shared::Headers;

/// Headers plus the rows that passed the filter
pub struct ProcessedData<'a> {
    pub headers: Headers,
    pub rows: RowIter<'a>,
}

impl std::fmt::Debug for ProcessedData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessedData")
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

pub struct Processor<'a> {
    data: TransformedData<'a>,
    filter: Filter,
}

impl<'a> Processor<'a> {
    pub fn new(data: TransformedData<'a>, filter: Filter) -> Self {
        Self { data, filter }
    }

    /// Build the filtered stream. Rows are evaluated only when pulled; errors
    /// from the source or the filter are passed through in order.
    pub fn build_lazy(self) -> ProcessedData<'a> {
        let Processor { data, filter } = self;

        let rows = data.rows.filter_map(move |row| {
            let row = match row {
                Ok(row) => row,
                Err(e) => return Some(Err(e)),
            };
            match filter.is_satisfied_by(&row) {
                Ok(true) => Some(Ok(row)),
                Ok(false) => None,
                Err(e) => Some(Err(e)),
            }
        });

        ProcessedData {
            headers: data.headers,
            rows: Box::new(rows),
        }
    }
}
