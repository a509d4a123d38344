use ep_ingest::{looks_like_lastpass, tokenize_records};
use ep_model::ImportResult;

use crate::error::Result;
use crate::reducer::LastpassImporter;

/// Imports the text of a Lastpass CSV export.
///
/// Returns `Ok(None)` when the text does not start with the Lastpass
/// header, so a dispatcher can try other formats. The master password is
/// checked before anything is tokenized.
///
/// The text must already be HTML-entity decoded. Lastpass exports made
/// through its web page are entity-encoded; exports written by its binary
/// component are not, and decoding those anyway corrupts passwords or
/// notes that contain entity-like sequences. Callers are expected to
/// assume encoding happened.
pub async fn parse_lastpass_export(
    text: &str,
    importer: &LastpassImporter,
) -> Result<Option<ImportResult>> {
    if !looks_like_lastpass(text) {
        tracing::debug!("input is not a Lastpass export");
        return Ok(None);
    }
    importer.require_master_password()?;

    let records = tokenize_records(text)?;
    importer.reduce_records(&records).await.map(Some)
}
