//! Quote-aware CSV tokenizer with a fixed column count.

use std::iter::Peekable;
use std::mem;
use std::str::Chars;

use crate::error::{CsvError, Result};

use super::header::HEADER_COLUMNS;
use super::strip_bom;

/// One tokenized record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    /// 1-based line on which the record starts.
    pub line: usize,
    /// Field values, exactly as many as the tokenizer expects.
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    Unquoted,
    Quoted,
}

/// Single-pass CSV scanner.
///
/// Fields are not trimmed. Inside quotes, commas and line breaks are
/// literal and `""` stands for one `"`. Every record must have exactly
/// `expected_columns` fields.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    expected_columns: usize,
}

impl Tokenizer {
    pub fn new(expected_columns: usize) -> Self {
        Self { expected_columns }
    }

    /// Tokenizer for the seven Lastpass columns.
    pub fn lastpass() -> Self {
        Self::new(HEADER_COLUMNS.len())
    }

    pub fn expected_columns(&self) -> usize {
        self.expected_columns
    }

    /// Tokenizes `text` into records, keeping the line each record starts on.
    ///
    /// The text is trimmed and given exactly one trailing terminator, so a
    /// missing final newline and trailing blank lines both behave the same.
    pub fn tokenize_records(&self, text: &str) -> Result<Vec<CsvRecord>> {
        let body = strip_bom(text).trim();
        let mut input = String::with_capacity(body.len() + 1);
        input.push_str(body);
        input.push('\n');

        let mut scan = Scan::new(self.expected_columns);
        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            scan.step(c, &mut chars)?;
        }
        scan.finish()
    }

    /// Tokenizes `text` into rows of fields.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Vec<String>>> {
        Ok(self
            .tokenize_records(text)?
            .into_iter()
            .map(|record| record.fields)
            .collect())
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::lastpass()
    }
}

/// Tokenizes a Lastpass export into rows of seven fields.
pub fn tokenize(text: &str) -> Result<Vec<Vec<String>>> {
    Tokenizer::lastpass().tokenize(text)
}

/// Tokenizes a Lastpass export into line-numbered records.
pub fn tokenize_records(text: &str) -> Result<Vec<CsvRecord>> {
    Tokenizer::lastpass().tokenize_records(text)
}

struct Scan {
    expected: usize,
    state: QuoteState,
    value: String,
    fields: Vec<String>,
    records: Vec<CsvRecord>,
    line: usize,
    record_start: usize,
}

impl Scan {
    fn new(expected: usize) -> Self {
        Self {
            expected,
            state: QuoteState::Unquoted,
            value: String::new(),
            fields: Vec::with_capacity(expected),
            records: Vec::new(),
            line: 1,
            record_start: 1,
        }
    }

    fn step(&mut self, c: char, rest: &mut Peekable<Chars<'_>>) -> Result<()> {
        match (c, self.state) {
            ('"', QuoteState::Unquoted) => self.state = QuoteState::Quoted,
            ('"', QuoteState::Quoted) => {
                if rest.next_if_eq(&'"').is_some() {
                    self.value.push('"');
                } else {
                    self.state = QuoteState::Unquoted;
                }
            }
            (',', QuoteState::Unquoted) => self.fields.push(mem::take(&mut self.value)),
            ('\r' | '\n', QuoteState::Unquoted) => {
                if c == '\r' {
                    rest.next_if_eq(&'\n');
                }
                self.end_record()?;
            }
            ('\r' | '\n', QuoteState::Quoted) => {
                self.value.push(c);
                if c == '\r' && rest.next_if_eq(&'\n').is_some() {
                    self.value.push('\n');
                }
                self.line += 1;
            }
            _ => self.value.push(c),
        }
        Ok(())
    }

    fn end_record(&mut self) -> Result<()> {
        self.fields.push(mem::take(&mut self.value));
        if self.fields.len() != self.expected {
            return Err(CsvError::WrongValueCount {
                line: self.line,
                saw: self.fields.len(),
                expected: self.expected,
            });
        }
        let fields = mem::replace(&mut self.fields, Vec::with_capacity(self.expected));
        self.records.push(CsvRecord {
            line: self.record_start,
            fields,
        });
        self.line += 1;
        self.record_start = self.line;
        Ok(())
    }

    fn finish(self) -> Result<Vec<CsvRecord>> {
        if self.state == QuoteState::Quoted {
            return Err(CsvError::UnterminatedQuote {
                line: self.record_start,
            });
        }
        tracing::trace!(records = self.records.len(), "tokenized CSV");
        Ok(self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Tokenizer {
        Tokenizer::new(3)
    }

    #[test]
    fn test_tokenize_simple() {
        let rows = three().tokenize("a,b,c\nd,e,f").expect("tokenize");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn test_tokenize_quoted_comma_newline_and_quote() {
        let rows = three()
            .tokenize("\"a,b\nc\"\"d\",x,y")
            .expect("tokenize");
        assert_eq!(rows, vec![vec!["a,b\nc\"d", "x", "y"]]);
    }

    #[test]
    fn test_fields_are_not_trimmed() {
        let rows = three().tokenize("a, b ,\" c \"").expect("tokenize");
        assert_eq!(rows, vec![vec!["a", " b ", " c "]]);
    }

    #[test]
    fn test_empty_fields() {
        let rows = three().tokenize(",,\n\"\",,").expect("tokenize");
        assert_eq!(rows, vec![vec!["", "", ""], vec!["", "", ""]]);
    }

    #[test]
    fn test_trailing_newlines_do_not_add_rows() {
        let rows = three().tokenize("a,b,c\n\n\n").expect("tokenize");
        assert_eq!(rows.len(), 1);
        let rows = three().tokenize("a,b,c").expect("tokenize");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_crlf_is_one_terminator() {
        let rows = three().tokenize("a,b,c\r\nd,e,f\r\n").expect("tokenize");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn test_lone_cr_is_terminator() {
        let rows = three().tokenize("a,b,c\rd,e,f").expect("tokenize");
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_crlf_inside_quotes_is_kept() {
        let rows = three().tokenize("\"x\r\ny\",b,c").expect("tokenize");
        assert_eq!(rows[0][0], "x\r\ny");
    }

    #[test]
    fn test_wrong_value_count_reports_line() {
        let err = three().tokenize("a,b,c\nd,e\ng,h,i").unwrap_err();
        assert_eq!(
            err,
            CsvError::WrongValueCount {
                line: 2,
                saw: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn test_too_many_values() {
        let err = three().tokenize("a,b,c,d").unwrap_err();
        assert_eq!(
            err,
            CsvError::WrongValueCount {
                line: 1,
                saw: 4,
                expected: 3
            }
        );
    }

    #[test]
    fn test_line_numbers_count_embedded_newlines() {
        let records = three()
            .tokenize_records("\"a\nb\",c,d\ne,f,g\nh,i")
            .unwrap_err();
        assert_eq!(records.line(), 4);

        let records = three()
            .tokenize_records("\"a\nb\",c,d\ne,f,g")
            .expect("tokenize");
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = three().tokenize("a,b,c\n\"d,e,f").unwrap_err();
        assert_eq!(err, CsvError::UnterminatedQuote { line: 2 });
    }

    #[test]
    fn test_bom_is_ignored() {
        let rows = three().tokenize("\u{feff}a,b,c").expect("tokenize");
        assert_eq!(rows[0][0], "a");
    }

    #[test]
    fn test_default_is_lastpass() {
        assert_eq!(Tokenizer::default().expected_columns(), 7);
    }
}
