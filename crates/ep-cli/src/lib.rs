//! CLI library components for the Lastpass importer.

pub mod logging;
pub mod report;
