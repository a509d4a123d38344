//! Lastpass export ingestion.
//!
//! This crate turns the text of a Lastpass CSV export into rows of fields.
//! It knows nothing about credentials or encryption; the reducer in
//! `ep-import` consumes the rows produced here.
//!
//! # Features
//!
//! - **Format detection**: cheap header check that never fails
//! - **Tokenizing**: quote-aware CSV scan with a fixed column count and
//!   line-numbered errors
//!
//! # Example
//!
//! ```
//! use ep_ingest::{looks_like_lastpass, tokenize};
//!
//! let text = "url,username,password,extra,name,grouping,fav\n\
//!             http://example.com,jane,secret,,Mail,,0\n";
//!
//! assert!(looks_like_lastpass(text));
//! let rows = tokenize(text)?;
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1][1], "jane");
//! # Ok::<(), ep_ingest::CsvError>(())
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{CsvError, Result};

// === Format Detection ===
pub use csv::{HEADER, HEADER_COLUMNS, looks_like_lastpass};

// === Tokenizing ===
pub use csv::{CsvRecord, Tokenizer, tokenize, tokenize_records};
