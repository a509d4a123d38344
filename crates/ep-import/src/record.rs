use ep_ingest::{CsvError, HEADER_COLUMNS};

/// Suffix that turns a username into the discriminator name for notes.
const NOTES_SUFFIX: &str = "\0\0notes";

/// Discriminator name used when encrypting the notes of `username`.
pub fn notes_discriminator(username: &str) -> String {
    format!("{username}{NOTES_SUFFIX}")
}

/// Fields of one Lastpass export record, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastpassRecord<'a> {
    pub url: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub extra: &'a str,
    pub name: &'a str,
    pub grouping: &'a str,
    pub fav: &'a str,
}

impl<'a> LastpassRecord<'a> {
    /// Splits a record into its named fields.
    ///
    /// Records from the tokenizer always have seven fields; rows built by
    /// hand are checked the same way the tokenizer checks them.
    pub fn from_fields(fields: &'a [String], line: usize) -> Result<Self, CsvError> {
        let [url, username, password, extra, name, grouping, fav] = fields else {
            return Err(CsvError::WrongValueCount {
                line,
                saw: fields.len(),
                expected: HEADER_COLUMNS.len(),
            });
        };
        Ok(Self {
            url,
            username,
            password,
            extra,
            name,
            grouping,
            fav,
        })
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }

    pub fn has_notes(&self) -> bool {
        !self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn test_from_fields() {
        let row = fields(&["http://a.com", "jane", "pw", "", "Mail", "Email", "1"]);
        let record = LastpassRecord::from_fields(&row, 2).expect("record");
        assert_eq!(record.username, "jane");
        assert_eq!(record.grouping, "Email");
        assert!(record.has_password());
        assert!(!record.has_notes());
    }

    #[test]
    fn test_from_fields_wrong_count() {
        let row = fields(&["http://a.com", "jane"]);
        let err = LastpassRecord::from_fields(&row, 5).unwrap_err();
        assert_eq!(
            err,
            CsvError::WrongValueCount {
                line: 5,
                saw: 2,
                expected: 7
            }
        );
    }

    #[test]
    fn test_notes_discriminator() {
        assert_eq!(notes_discriminator("jane"), "jane\0\0notes");
        assert_eq!(notes_discriminator(""), "\0\0notes");
    }
}
