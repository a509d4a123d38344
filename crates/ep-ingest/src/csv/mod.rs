//! CSV detection and tokenizing for Lastpass exports.

mod header;
mod tokenizer;

pub use header::{HEADER, HEADER_COLUMNS, looks_like_lastpass};
pub use tokenizer::{CsvRecord, Tokenizer, tokenize, tokenize_records};

/// Removes a leading UTF-8 byte order mark, if any.
pub(crate) fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
