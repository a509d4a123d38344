//! Lastpass header line and format detection.

use super::strip_bom;

/// Header line of every Lastpass CSV export.
pub const HEADER: &str = "url,username,password,extra,name,grouping,fav";

/// Column names of [`HEADER`], in order.
pub const HEADER_COLUMNS: [&str; 7] = [
    "url", "username", "password", "extra", "name", "grouping", "fav",
];

/// Returns true if `text` starts with the Lastpass header line.
///
/// The check is done on the trimmed text and requires a line terminator
/// after the header. A mismatch is not an error: callers try other formats.
pub fn looks_like_lastpass(text: &str) -> bool {
    strip_bom(text)
        .trim()
        .strip_prefix(HEADER)
        .is_some_and(|rest| rest.starts_with('\n') || rest.starts_with("\r\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_columns_match_header() {
        assert_eq!(HEADER_COLUMNS.join(","), HEADER);
    }

    #[test]
    fn test_detects_header() {
        assert!(looks_like_lastpass(&format!("{HEADER}\nhttp://a,,,,a,,0")));
    }

    #[test]
    fn test_detects_header_after_whitespace() {
        assert!(looks_like_lastpass(&format!("\n  {HEADER}\r\nhttp://a,,,,a,,0\n")));
    }

    #[test]
    fn test_detects_header_after_bom() {
        assert!(looks_like_lastpass(&format!("\u{feff}{HEADER}\nx")));
    }

    #[test]
    fn test_rejects_header_only() {
        assert!(!looks_like_lastpass(HEADER));
        assert!(!looks_like_lastpass(&format!("{HEADER}\n\n")));
    }

    #[test]
    fn test_rejects_other_formats() {
        assert!(!looks_like_lastpass(""));
        assert!(!looks_like_lastpass("name,url,username,password\n"));
        assert!(!looks_like_lastpass(&format!("{HEADER},extra\nx")));
        assert!(!looks_like_lastpass(&format!("URL,username,password,extra,name,grouping,fav\nx")));
    }
}
