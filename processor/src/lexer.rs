//! Field and line tokenization

use crate::error::{ProcessError, Result};
use std::str::Split;

/// Splits records into fields on a fixed delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexer {
    delimiter: String,
}

impl Lexer {
    /// Create a lexer. The delimiter must not be empty.
    pub fn new(delimiter: impl Into<String>) -> Result<Self> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(ProcessError::EmptyDelimiter);
        }
        Ok(Self { delimiter })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Split `data` into owned fields. An empty input yields one empty field.
    pub fn tokenize(&self, data: &str) -> Vec<String> {
        data.split(self.delimiter.as_str())
            .map(str::to_owned)
            .collect()
    }
}

/// Lazily split `full` into lines.
///
/// Input without the delimiter is yielded whole, even when empty. A trailing
/// delimiter produces a final empty line. An empty delimiter never splits.
pub fn lines_split_lazy<'a>(full: &'a str, line_delimiter: &'a str) -> LineSplit<'a> {
    let inner = if line_delimiter.is_empty() {
        Inner::Whole(Some(full))
    } else {
        Inner::Split(full.split(line_delimiter))
    };
    LineSplit { inner }
}

/// Iterator returned by [`lines_split_lazy`].
#[derive(Debug)]
pub struct LineSplit<'a> {
    inner: Inner<'a>,
}

#[derive(Debug)]
enum Inner<'a> {
    Whole(Option<&'a str>),
    Split(Split<'a, &'a str>),
}

impl<'a> Iterator for LineSplit<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Whole(line) => line.take(),
            Inner::Split(split) => split.next(),
        }
    }
}
