//! Reduction of tokenized records into an [`ImportResult`].
//!
//! One synchronous pass validates every record, assigns each credential a
//! slot and spawns the encryption tasks for its secrets. The tasks never
//! touch shared state: each one returns its blob tagged with the slot it
//! belongs to, and the join loop stores it. Sites are assembled once every
//! task has finished.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use ep_crypto::{EncryptParams, MasterPassword, MasterPasswordProvider, PasswordEncryptor};
use ep_ingest::CsvRecord;
use ep_model::{EncryptedBlob, ImportResult, PasswordEntry};
use tokio::task::JoinSet;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::domain::normalize_domain;
use crate::error::{ImportError, Result};
use crate::record::{LastpassRecord, notes_discriminator};

/// Encryption progress of a running import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportProgress {
    pub completed: usize,
    pub total: usize,
}

impl ImportProgress {
    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

type ProgressCallback = Arc<dyn Fn(ImportProgress) + Send + Sync>;

/// Imports Lastpass records using the given collaborators.
#[derive(Clone)]
pub struct LastpassImporter {
    encryptor: Arc<dyn PasswordEncryptor>,
    master: Arc<dyn MasterPasswordProvider>,
    progress: Option<ProgressCallback>,
}

impl fmt::Debug for LastpassImporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LastpassImporter")
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

impl LastpassImporter {
    pub fn new(
        encryptor: Arc<dyn PasswordEncryptor>,
        master: Arc<dyn MasterPasswordProvider>,
    ) -> Self {
        Self {
            encryptor,
            master,
            progress: None,
        }
    }

    /// Report encryption progress to `callback`.
    ///
    /// The callback is invoked once when all tasks have been launched and
    /// again after each task completes.
    #[must_use]
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ImportProgress) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(callback));
        self
    }

    /// Returns the current master password or fails with
    /// [`ImportError::MasterPasswordRequired`].
    pub fn require_master_password(&self) -> Result<MasterPassword> {
        self.master
            .master_password()
            .ok_or(ImportError::MasterPasswordRequired)
    }

    /// Reduces rows, the first of which is the header, into an import.
    ///
    /// Row `i` (0-based) is reported as line `i + 1` in errors. That is the
    /// row number, which only equals the physical line when no earlier field
    /// spans lines. Use [`reduce_records`](Self::reduce_records) with the
    /// output of [`ep_ingest::tokenize_records`] to report physical lines.
    pub async fn reduce(&self, rows: &[Vec<String>]) -> Result<ImportResult> {
        let records: Vec<CsvRecord> = rows
            .iter()
            .enumerate()
            .map(|(index, fields)| CsvRecord {
                line: index + 1,
                fields: fields.clone(),
            })
            .collect();
        self.reduce_records(&records).await
    }

    /// Reduces tokenized records, the first of which is the header.
    ///
    /// Fails before looking at any record when no master password is
    /// available. Any failure drops the in-flight encryption tasks and no
    /// partial result is returned.
    pub async fn reduce_records(&self, records: &[CsvRecord]) -> Result<ImportResult> {
        let master = self.require_master_password()?;
        let span = info_span!("lastpass_import", records = records.len().saturating_sub(1));

        async move {
            let mut plan = ImportPlan::new(master, Arc::clone(&self.encryptor));
            for record in records.iter().skip(1) {
                plan.add_record(record)?;
            }
            info!(
                entries = plan.slots.len(),
                tasks = plan.tasks.len(),
                "records validated, waiting for encryption"
            );
            plan.finish(self.progress.as_deref()).await
        }
        .instrument(span)
        .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SecretField {
    Password,
    Notes,
}

struct EncryptedSecret {
    slot: usize,
    field: SecretField,
    blob: EncryptedBlob,
}

struct Slot {
    domain: String,
    username: String,
    entry: PasswordEntry,
    has_password: bool,
    has_notes: bool,
}

impl Slot {
    /// A repeat of this (domain, username) pair may only fill in the secret
    /// this slot lacks: notes for a password-only entry or the reverse.
    fn accepts(&self, record: &LastpassRecord<'_>) -> bool {
        let adds_password_only = record.has_password() && !record.has_notes();
        let adds_notes_only = record.has_notes() && !record.has_password();
        (adds_password_only && !self.has_password && self.has_notes)
            || (adds_notes_only && !self.has_notes && self.has_password)
    }
}

struct ImportPlan {
    master: MasterPassword,
    encryptor: Arc<dyn PasswordEncryptor>,
    slots: Vec<Slot>,
    index: HashMap<(String, String), usize>,
    tasks: JoinSet<ep_crypto::Result<EncryptedSecret>>,
}

impl ImportPlan {
    fn new(master: MasterPassword, encryptor: Arc<dyn PasswordEncryptor>) -> Self {
        Self {
            master,
            encryptor,
            slots: Vec::new(),
            index: HashMap::new(),
            tasks: JoinSet::new(),
        }
    }

    fn add_record(&mut self, csv: &CsvRecord) -> Result<()> {
        let record = LastpassRecord::from_fields(&csv.fields, csv.line)?;
        let domain = normalize_domain(record.url);

        if record.name.is_empty() {
            return Err(ImportError::MissingName { line: csv.line });
        }

        let slot = match self
            .index
            .entry((domain.clone(), record.username.to_string()))
        {
            Entry::Vacant(vacant) => {
                let slot = self.slots.len();
                self.slots.push(Slot {
                    domain: domain.clone(),
                    username: record.username.to_string(),
                    entry: PasswordEntry::new(record.name),
                    has_password: false,
                    has_notes: false,
                });
                vacant.insert(slot);
                slot
            }
            Entry::Occupied(occupied) => {
                let slot = *occupied.get();
                if !self.slots[slot].accepts(&record) {
                    return Err(ImportError::DuplicateEntry {
                        domain,
                        username: record.username.to_string(),
                    });
                }
                warn!(line = csv.line, "merging record into an earlier entry for the same user");
                slot
            }
        };

        debug!(
            line = csv.line,
            password = record.has_password(),
            notes = record.has_notes(),
            "record accepted"
        );

        if record.has_notes() {
            self.slots[slot].has_notes = true;
            self.spawn(slot, SecretField::Notes, notes_discriminator(record.username), record.extra);
        }
        if record.has_password() {
            self.slots[slot].has_password = true;
            self.spawn(
                slot,
                SecretField::Password,
                record.username.to_string(),
                record.password,
            );
        }
        Ok(())
    }

    fn spawn(&mut self, slot: usize, field: SecretField, name: String, plaintext: &str) {
        let params = EncryptParams {
            domain: self.slots[slot].domain.clone(),
            master_password: self.master.clone(),
            name,
            password: plaintext.to_string(),
        };
        let encryptor = Arc::clone(&self.encryptor);
        self.tasks.spawn(async move {
            let blob = encryptor.encrypt_password(params).await?;
            Ok(EncryptedSecret { slot, field, blob })
        });
    }

    async fn finish(
        mut self,
        progress: Option<&(dyn Fn(ImportProgress) + Send + Sync)>,
    ) -> Result<ImportResult> {
        let total = self.tasks.len();
        let mut completed = 0;
        let report = |completed| {
            if let Some(callback) = progress {
                callback(ImportProgress { completed, total });
            }
        };
        report(completed);

        while let Some(joined) = self.tasks.join_next().await {
            let secret = joined.map_err(ImportError::TaskFailed)??;
            let entry = &mut self.slots[secret.slot].entry;
            match secret.field {
                SecretField::Password => entry.set_password(secret.blob),
                SecretField::Notes => entry.set_notes(secret.blob),
            }
            completed += 1;
            report(completed);
        }

        let mut result = ImportResult::new();
        for slot in self.slots {
            result
                .site_entry(&slot.domain)
                .passwords
                .insert(slot.username, slot.entry);
        }
        info!(
            sites = result.sites.len(),
            entries = result.entry_count(),
            "import complete"
        );
        Ok(result)
    }
}
