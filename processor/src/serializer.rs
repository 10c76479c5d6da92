//! Column projection and CSV output

use crate::error::{ProcessError, Result};
use crate::lexer::Lexer;
use crate::processor::ProcessedData;
use libcsv_shared::types::header_position;
use std::collections::BTreeSet;
use std::io::Write;

/// Columns to emit, always in header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    indexes: Vec<usize>,
}

impl ColumnSelection {
    pub fn all(width: usize) -> Self {
        Self {
            indexes: (0..width).collect(),
        }
    }

    /// Resolve a delimited list of column names against `headers`.
    ///
    /// An empty selection means every column. Repeated names collapse and the
    /// order of the names does not matter.
    pub fn parse(selected_columns: &str, headers: &[String], lexer: &Lexer) -> Result<Self> {
        if selected_columns.is_empty() {
            return Ok(Self::all(headers.len()));
        }

        let mut indexes = BTreeSet::new();
        for column in lexer.tokenize(selected_columns) {
            let position = header_position(headers, &column)
                .ok_or(ProcessError::HeaderNotFound(column))?;
            indexes.insert(position);
        }

        Ok(Self {
            indexes: indexes.into_iter().collect(),
        })
    }

    /// Selected entries of `entries`. Positions past the end are skipped.
    pub fn project<'e>(&self, entries: &'e [String]) -> Vec<&'e str> {
        self.indexes
            .iter()
            .filter_map(|&index| entries.get(index).map(String::as_str))
            .collect()
    }
}

pub struct Serializer<'a> {
    data: ProcessedData<'a>,
    lexer: Lexer,
}

impl<'a> Serializer<'a> {
    /// `lexer` splits the column selection and its delimiter joins output fields.
    pub fn new(data: ProcessedData<'a>, lexer: Lexer) -> Self {
        Self { data, lexer }
    }

    /// Stream the header line and every row to `out`, one `\n`-terminated
    /// line each. Returns the number of rows written.
    pub fn write<W: Write>(self, selected_columns: &str, out: &mut W) -> Result<usize> {
        let Serializer { data, lexer } = self;
        let selection = ColumnSelection::parse(selected_columns, &data.headers, &lexer)?;
        let delimiter = lexer.delimiter();

        writeln!(out, "{}", selection.project(&data.headers).join(delimiter))?;

        let mut written = 0;
        for row in data.rows {
            let row = row?;
            writeln!(out, "{}", selection.project(&row).join(delimiter))?;
            written += 1;
        }

        Ok(written)
    }

    /// Serialize into a string.
    pub fn stringify(self, selected_columns: &str) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(selected_columns, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ProcessError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcsv_shared::Row;

    fn processed() -> ProcessedData<'static> {
        let rows: Vec<Result<Row>> = vec![
            Ok(vec!["10".to_string(), "20".to_string()]),
            Ok(vec!["30".to_string(), "40".to_string()]),
        ];
        ProcessedData {
            headers: vec!["header1".to_string(), "header2".to_string()],
            rows: Box::new(rows.into_iter()),
        }
    }

    fn serializer() -> Serializer<'static> {
        Serializer::new(processed(), Lexer::new(",").unwrap())
    }

    #[test]
    fn test_stringify_all_columns() {
        let result = serializer().stringify("").unwrap();
        assert_eq!(result, "header1,header2\n10,20\n30,40\n");
    }

    #[test]
    fn test_stringify_single_column() {
        let result = serializer().stringify("header1").unwrap();
        assert_eq!(result, "header1\n10\n30\n");
    }

    #[test]
    fn test_stringify_multiple_columns() {
        let result = serializer().stringify("header1,header2").unwrap();
        assert_eq!(result, "header1,header2\n10,20\n30,40\n");
    }

    #[test]
    fn test_selection_order_follows_headers() {
        let result = serializer().stringify("header2,header1,header2").unwrap();
        assert_eq!(result, "header1,header2\n10,20\n30,40\n");
    }

    #[test]
    fn test_stringify_invalid_column() {
        let err = serializer().stringify("header3").unwrap_err();
        assert_eq!(err.to_string(), "Header 'header3' not found in CSV file/string");
    }

    #[test]
    fn test_empty_cells_kept() {
        let rows: Vec<Result<Row>> = vec![Ok(vec!["1".into(), "".into(), "3".into()])];
        let data = ProcessedData {
            headers: vec!["a".into(), "b".into(), "c".into()],
            rows: Box::new(rows.into_iter()),
        };
        let result = Serializer::new(data, Lexer::new(",").unwrap())
            .stringify("")
            .unwrap();
        assert_eq!(result, "a,b,c\n1,,3\n");
    }

    #[test]
    fn test_headers_only_when_no_rows() {
        let data = ProcessedData {
            headers: vec!["a".into()],
            rows: Box::new(std::iter::empty::<Result<Row>>()),
        };
        let mut out = Vec::new();
        let written = Serializer::new(data, Lexer::new(",").unwrap())
            .write("", &mut out)
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(out, b"a\n");
    }

    #[test]
    fn test_project_skips_missing_positions() {
        let selection = ColumnSelection::all(3);
        let entries = vec!["x".to_string()];
        assert_eq!(selection.project(&entries), vec!["x"]);
    }
}
