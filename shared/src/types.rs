//! Table vocabulary shared by the pipeline stages

/// One tokenized CSV record.
pub type Row = Vec<String>;

/// Column names taken from the first line of the input.
pub type Headers = Vec<String>;

/// Position of the first header named `name`.
///
/// Duplicate header names resolve to their first occurrence.
pub fn header_position(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}
