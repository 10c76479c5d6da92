//! Single-column comparisons used by row filters

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a filter definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonType {
    Equal,
    GreaterThan,
    LessThan,
    NotEqual,
    GreaterOrEqual,
    LessOrEqual,
}

impl ComparisonType {
    /// Operators in matching priority: longer symbols first so `<=` is never
    /// read as `<` followed by `=`.
    pub const PRIORITY: [ComparisonType; 6] = [
        ComparisonType::LessOrEqual,
        ComparisonType::GreaterOrEqual,
        ComparisonType::NotEqual,
        ComparisonType::Equal,
        ComparisonType::GreaterThan,
        ComparisonType::LessThan,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonType::Equal => "=",
            ComparisonType::GreaterThan => ">",
            ComparisonType::LessThan => "<",
            ComparisonType::NotEqual => "!=",
            ComparisonType::GreaterOrEqual => ">=",
            ComparisonType::LessOrEqual => "<=",
        }
    }

    /// Whether `ordering` (value compared to reference) satisfies the operator.
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            ComparisonType::Equal => ordering.is_eq(),
            ComparisonType::GreaterThan => ordering.is_gt(),
            ComparisonType::LessThan => ordering.is_lt(),
            ComparisonType::NotEqual => ordering.is_ne(),
            ComparisonType::GreaterOrEqual => ordering.is_ge(),
            ComparisonType::LessOrEqual => ordering.is_le(),
        }
    }
}

impl FromStr for ComparisonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRIORITY
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| format!("Invalid comparison type: {}", s))
    }
}

impl fmt::Display for ComparisonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `header <op> reference` check against one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    header: String,
    comparison_type: ComparisonType,
    reference_value: String,
}

impl Comparison {
    pub fn new(
        header: impl Into<String>,
        comparison_type: ComparisonType,
        reference_value: impl Into<String>,
    ) -> Self {
        Self {
            header: header.into(),
            comparison_type,
            reference_value: reference_value.into(),
        }
    }

    /// Compare numerically when both sides are integers, as text otherwise.
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        let ordering = match (parse_integer(value), parse_integer(&self.reference_value)) {
            (Some(value), Some(reference)) => value.cmp(&reference),
            _ => value.cmp(self.reference_value.as_str()),
        };
        self.comparison_type.accepts(ordering)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.header, self.comparison_type, self.reference_value)
    }
}

/// Integer reading of a cell: surrounding whitespace and a sign are allowed.
fn parse_integer(value: &str) -> Option<i128> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let comparison = Comparison::new("age", ComparisonType::GreaterOrEqual, "30");
        assert_eq!(comparison.to_string(), "age >= 30");
    }

    #[test]
    fn test_equal() {
        let comparison = Comparison::new("header1", ComparisonType::Equal, "10");
        assert!(comparison.is_satisfied_by("10"));
        assert!(!comparison.is_satisfied_by("5"));
    }

    #[test]
    fn test_greater_than() {
        let comparison = Comparison::new("header1", ComparisonType::GreaterThan, "10");
        assert!(comparison.is_satisfied_by("15"));
        assert!(!comparison.is_satisfied_by("10"));
    }

    #[test]
    fn test_less_than() {
        let comparison = Comparison::new("header1", ComparisonType::LessThan, "10");
        assert!(comparison.is_satisfied_by("5"));
        assert!(!comparison.is_satisfied_by("10"));
    }

    #[test]
    fn test_not_equal() {
        let comparison = Comparison::new("header1", ComparisonType::NotEqual, "10");
        assert!(comparison.is_satisfied_by("5"));
        assert!(!comparison.is_satisfied_by("10"));
    }

    #[test]
    fn test_greater_or_equal() {
        let comparison = Comparison::new("header1", ComparisonType::GreaterOrEqual, "10");
        assert!(comparison.is_satisfied_by("10"));
        assert!(comparison.is_satisfied_by("15"));
        assert!(!comparison.is_satisfied_by("5"));
    }

    #[test]
    fn test_less_or_equal() {
        let comparison = Comparison::new("header1", ComparisonType::LessOrEqual, "10");
        assert!(comparison.is_satisfied_by("10"));
        assert!(comparison.is_satisfied_by("5"));
        assert!(!comparison.is_satisfied_by("15"));
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        // "9" > "10" as text, but not as numbers
        let comparison = Comparison::new("age", ComparisonType::GreaterThan, "10");
        assert!(!comparison.is_satisfied_by("9"));
        assert!(comparison.is_satisfied_by("100"));
    }

    #[test]
    fn test_integer_parsing_allows_whitespace_and_sign() {
        let comparison = Comparison::new("n", ComparisonType::Equal, " 10");
        assert!(comparison.is_satisfied_by("+10 "));

        let negative = Comparison::new("n", ComparisonType::LessThan, "0");
        assert!(negative.is_satisfied_by("-3"));
    }

    #[test]
    fn test_string_comparison() {
        let comparison = Comparison::new("name", ComparisonType::Equal, "string");
        assert!(comparison.is_satisfied_by("string"));
        assert!(!comparison.is_satisfied_by("another_string"));

        let ordered = Comparison::new("name", ComparisonType::LessThan, "Bob");
        assert!(ordered.is_satisfied_by("Alice"));
        assert!(!ordered.is_satisfied_by("Charlie"));
    }

    #[test]
    fn test_mixed_types_fall_back_to_text() {
        // "abc" is not a number, so "10" is compared as text
        let comparison = Comparison::new("v", ComparisonType::LessThan, "abc");
        assert!(comparison.is_satisfied_by("10"));
    }

    #[test]
    fn test_operator_parsing() {
        for op in ComparisonType::PRIORITY {
            assert_eq!(op.symbol().parse::<ComparisonType>().unwrap(), op);
        }
        assert!("=>".parse::<ComparisonType>().is_err());
    }
}
