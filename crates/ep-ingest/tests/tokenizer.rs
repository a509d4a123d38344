//! Tokenizer behavior on complete Lastpass exports.

use ep_ingest::{CsvError, HEADER, looks_like_lastpass, tokenize, tokenize_records};
use proptest::prelude::*;

fn export(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

/// Writes one seven-field record with every field quoted.
fn quoted_record(fields: &[&str]) -> String {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields).expect("write record");
    let bytes = writer.into_inner().expect("flush writer");
    String::from_utf8(bytes).expect("utf8")
}

#[test]
fn header_only_export_has_one_row() {
    let rows = tokenize(HEADER).expect("tokenize");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].join(","), HEADER);
}

#[test]
fn quoted_field_with_comma_newline_and_quote() {
    let text = export(&["\"a,b\nc\"\"d\",jane,pw,,Mail,,0"]);
    let rows = tokenize(&text).expect("tokenize");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "a,b\nc\"d");
    assert_eq!(rows[1][1], "jane");
}

#[test]
fn six_fields_fail_with_line_number() {
    let text = export(&["http://a.com,jane,pw,,Mail,0", "http://b.com,joe,pw,,Bank,,0"]);
    let err = tokenize(&text).unwrap_err();
    assert_eq!(
        err,
        CsvError::WrongValueCount {
            line: 2,
            saw: 6,
            expected: 7
        }
    );
    assert_eq!(
        err.to_string(),
        "Line 2: wrong number of values, saw 6, expected 7"
    );
}

#[test]
fn eight_fields_fail_with_line_number() {
    let text = export(&["http://a.com,jane,pw,,Mail,,0", "http://b.com,joe,pw,,Bank,,0,extra"]);
    let err = tokenize(&text).unwrap_err();
    assert_eq!(
        err,
        CsvError::WrongValueCount {
            line: 3,
            saw: 8,
            expected: 7
        }
    );
}

#[test]
fn multi_line_notes_shift_line_numbers() {
    let text = export(&[
        "http://sn,,,\"line one\nline two\nline three\",Note,Secure Notes,0",
        "http://a.com,jane,pw,,Mail,,0",
    ]);
    let records = tokenize_records(&text).expect("tokenize");
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].line, 2);
    assert_eq!(records[2].line, 5);
    assert_eq!(records[1].fields[3], "line one\nline two\nline three");
}

#[test]
fn unterminated_quote_is_reported() {
    let text = export(&["http://a.com,jane,\"pw,,Mail,,0"]);
    let err = tokenize(&text).unwrap_err();
    assert!(matches!(err, CsvError::UnterminatedQuote { line: 2 }));
}

#[test]
fn windows_line_endings() {
    let text = format!("{HEADER}\r\nhttp://a.com,jane,pw,,Mail,,0\r\n");
    assert!(looks_like_lastpass(&text));
    let rows = tokenize(&text).expect("tokenize");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][6], "0");
}

proptest! {
    #[test]
    fn quoted_values_survive_tokenizing(value in "[ -~\n]{0,40}", note in "\\PC{0,20}") {
        let record = quoted_record(&["http://example.com", &value, "pw", &note, "Name", "", "0"]);
        let text = format!("{HEADER}\n{record}");
        let rows = tokenize(&text).expect("tokenize");
        prop_assert_eq!(rows.len(), 2);
        prop_assert_eq!(&rows[1][1], &value);
        prop_assert_eq!(&rows[1][3], &note);
    }
}
