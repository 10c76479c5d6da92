//! Row filter built from newline-separated `header<op>value` definitions
//!
//! Every definition must hold for a row to pass. Several definitions may target
//! the same column.

use crate::comparison::{Comparison, ComparisonType};
use crate::error::{ProcessError, Result};
use libcsv_shared::types::header_position;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Operator symbols in `ComparisonType::PRIORITY` order; alternation order
/// gives longer symbols priority at the same position.
const OPERATOR_ALTERNATION: &str = "<=|>=|!=|=|>|<";

/// Leftmost operator occurrence. The pattern is a fixed literal, so compiling
/// it cannot fail at runtime.
static OPERATOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(OPERATOR_ALTERNATION).expect("fixed operator pattern"));

/// Split one definition into header, operator, and reference value.
///
/// The header is everything before the first operator, trimmed. The value is
/// everything after it, trimmed and stripped of surrounding quotes.
pub fn tokenize_filter(definition: &str) -> Result<(String, ComparisonType, String)> {
    if let Some(found) = OPERATOR_PATTERN.find(definition) {
        let header = definition[..found.start()].trim();
        let value = definition[found.end()..]
            .trim()
            .trim_matches(|c| c == '\'' || c == '"');

        if !header.is_empty() && !value.is_empty() {
            let operator = found
                .as_str()
                .parse()
                .map_err(|_| ProcessError::InvalidFilter(definition.to_string()))?;
            return Ok((header.to_string(), operator, value.to_string()));
        }
    }

    Err(ProcessError::InvalidFilter(definition.to_string()))
}

/// Conjunction of comparisons, grouped by column position
#[derive(Debug, Clone)]
pub struct Filter {
    headers: Vec<String>,
    comparisons: Vec<Vec<Comparison>>,
}

impl Filter {
    /// Parse `definitions` against `headers`. Blank lines are ignored.
    pub fn new(definitions: &str, headers: &[String]) -> Result<Self> {
        let mut comparisons = vec![Vec::new(); headers.len()];

        for definition in definitions.split('\n') {
            if definition.trim().is_empty() {
                continue;
            }

            let (header, operator, value) = tokenize_filter(definition)?;
            let position = header_position(headers, &header)
                .ok_or_else(|| ProcessError::HeaderNotFound(header.clone()))?;

            let comparison = Comparison::new(header, operator, value);
            debug!("Filter: {}", comparison);
            comparisons[position].push(comparison);
        }

        Ok(Self {
            headers: headers.to_vec(),
            comparisons,
        })
    }

    /// Number of parsed comparisons
    pub fn comparison_count(&self) -> usize {
        self.comparisons.iter().map(Vec::len).sum()
    }

    /// Check every comparison against `row`, stopping at the first failure.
    pub fn is_satisfied_by(&self, row: &[String]) -> Result<bool> {
        for (position, header_comparisons) in self.comparisons.iter().enumerate() {
            if header_comparisons.is_empty() {
                continue;
            }

            let cell = row.get(position).ok_or_else(|| ProcessError::MissingField {
                header: self.headers[position].clone(),
                width: row.len(),
            })?;

            if !header_comparisons.iter().all(|c| c.is_satisfied_by(cell)) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_operator_alternation_follows_priority() {
        let symbols: Vec<&str> = ComparisonType::PRIORITY.iter().map(|op| op.symbol()).collect();
        assert_eq!(OPERATOR_ALTERNATION, symbols.join("|"));
        assert_eq!(OPERATOR_PATTERN.find("a<=1").map(|m| m.as_str()), Some("<="));
    }

    #[test]
    fn test_tokenize_filter_operators() {
        let (h, op, v) = tokenize_filter("age>=30").unwrap();
        assert_eq!((h.as_str(), op, v.as_str()), ("age", ComparisonType::GreaterOrEqual, "30"));

        let (_, op, _) = tokenize_filter("age<=30").unwrap();
        assert_eq!(op, ComparisonType::LessOrEqual);

        let (_, op, _) = tokenize_filter("age!=30").unwrap();
        assert_eq!(op, ComparisonType::NotEqual);

        let (_, op, _) = tokenize_filter("age<30").unwrap();
        assert_eq!(op, ComparisonType::LessThan);
    }

    #[test]
    fn test_tokenize_filter_trims_and_unquotes() {
        let (h, op, v) = tokenize_filter("  name = 'Alice'  ").unwrap();
        assert_eq!(h, "name");
        assert_eq!(op, ComparisonType::Equal);
        assert_eq!(v, "Alice");

        let (_, _, v) = tokenize_filter("name=\"Bob\"").unwrap();
        assert_eq!(v, "Bob");
    }

    #[test]
    fn test_tokenize_filter_keeps_quoted_header() {
        let (h, _, v) = tokenize_filter("'a@ge'>29").unwrap();
        assert_eq!(h, "'a@ge'");
        assert_eq!(v, "29");
    }

    #[test]
    fn test_tokenize_filter_invalid() {
        for definition in ["age#25", ">25", "age>", "age>''", ""] {
            let err = tokenize_filter(definition).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid filter: '{}'", definition));
        }
    }

    #[test]
    fn test_single_filter() {
        let filter = Filter::new("header1=10", &headers(&["header1"])).unwrap();
        assert!(filter.is_satisfied_by(&row(&["10"])).unwrap());
        assert!(!filter.is_satisfied_by(&row(&["11"])).unwrap());
    }

    #[test]
    fn test_multiple_filters_all_must_hold() {
        let hs = headers(&["name", "age", "experience"]);
        let filter = Filter::new("age>25\nexperience>3", &hs).unwrap();
        assert_eq!(filter.comparison_count(), 2);
        assert!(filter.is_satisfied_by(&row(&["Alice", "30", "5"])).unwrap());
        assert!(!filter.is_satisfied_by(&row(&["Bob", "25", "3"])).unwrap());
        assert!(filter.is_satisfied_by(&row(&["Charlie", "35", "10"])).unwrap());
    }

    #[test]
    fn test_multiple_filters_same_column() {
        let hs = headers(&["name", "age"]);
        let filter = Filter::new("age>20\nage<35", &hs).unwrap();
        assert!(filter.is_satisfied_by(&row(&["Alice", "30"])).unwrap());
        assert!(!filter.is_satisfied_by(&row(&["Charlie", "35"])).unwrap());
    }

    #[test]
    fn test_comma_in_value() {
        let hs = headers(&["name", "note"]);
        let filter = Filter::new("note='a,b'", &hs).unwrap();
        assert!(filter.is_satisfied_by(&row(&["x", "a,b"])).unwrap());
        assert!(!filter.is_satisfied_by(&row(&["x", "a"])).unwrap());
    }

    #[test]
    fn test_blank_lines_ignored() {
        let hs = headers(&["age"]);
        let filter = Filter::new("\n  \nage>1\n", &hs).unwrap();
        assert_eq!(filter.comparison_count(), 1);
    }

    #[test]
    fn test_empty_definitions_accept_everything() {
        let hs = headers(&["age"]);
        let filter = Filter::new("", &hs).unwrap();
        assert_eq!(filter.comparison_count(), 0);
        assert!(filter.is_satisfied_by(&row(&["anything"])).unwrap());
        assert!(filter.is_satisfied_by(&row(&[])).unwrap());
    }

    #[test]
    fn test_unknown_header() {
        let err = Filter::new("height>60", &headers(&["name", "age"])).unwrap_err();
        assert_eq!(err.to_string(), "Header 'height' not found in CSV file/string");
    }

    #[test]
    fn test_invalid_operator() {
        let err = Filter::new("age#25", &headers(&["age"])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid filter: 'age#25'");
    }

    #[test]
    fn test_short_row_is_an_error() {
        let hs = headers(&["name", "age"]);
        let filter = Filter::new("age>1", &hs).unwrap();
        let err = filter.is_satisfied_by(&row(&["Alice"])).unwrap_err();
        assert!(matches!(err, ProcessError::MissingField { ref header, width: 1 } if header == "age"));
    }
}
