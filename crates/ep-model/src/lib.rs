pub mod blob;
pub mod store;

pub use blob::EncryptedBlob;
pub use store::{APPLICATION, EntryType, FORMAT_VERSION, ImportResult, PasswordEntry, Site};
