//! Error types for Lastpass export ingestion.

use thiserror::Error;

/// Structural problems found while tokenizing an export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsvError {
    /// A record did not have the expected number of fields.
    #[error("Line {line}: wrong number of values, saw {saw}, expected {expected}")]
    WrongValueCount {
        line: usize,
        saw: usize,
        expected: usize,
    },

    /// A quotation mark was opened but never closed.
    #[error("unterminated quotation (opened in record starting on line {line})")]
    UnterminatedQuote { line: usize },
}

impl CsvError {
    /// 1-based line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::WrongValueCount { line, .. } | Self::UnterminatedQuote { line } => *line,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CsvError::WrongValueCount {
            line: 3,
            saw: 6,
            expected: 7,
        };
        assert_eq!(
            err.to_string(),
            "Line 3: wrong number of values, saw 6, expected 7"
        );
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_unterminated_display() {
        let err = CsvError::UnterminatedQuote { line: 2 };
        assert!(err.to_string().starts_with("unterminated quotation"));
    }
}
