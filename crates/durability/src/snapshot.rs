//! Snapshot persistence for the record store.
//!
//! The durable state is one JSON document: an object mapping key to
//! record. The whole document is loaded at startup and rewritten on
//! every mutation — load-all/save-all, no partial-record persistence.
//!
//! Loading runs the versioned-decode migration from
//! [`tagstore_core::record::StoredRecord`], and self-heals from a
//! corrupt file: the unparseable file is preserved in the backup
//! directory and the store starts empty, favoring availability over
//! failing startup.
//!
//! Saving captures a backup of the previous file, then replaces the
//! durable file atomically (temp file in the same directory, fsync,
//! rename), so a crash mid-write never leaves a half-written document.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;

use tagstore_core::record::StoredRecord;
use tagstore_core::{Error, Record, Result};

use crate::backup::BackupRotation;

/// Outcome of loading the durable file.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// The loaded (and migrated) records
    pub records: BTreeMap<String, Record>,
    /// Count of legacy scalar entries upgraded to structured records
    pub migrated: usize,
    /// Whether the durable file was unparseable and the store self-healed
    pub recovered_from_corruption: bool,
}

/// Load/save access to the durable file, with backup rotation.
#[derive(Debug)]
pub struct SnapshotStore {
    data_file: PathBuf,
    backups: BackupRotation,
}

impl SnapshotStore {
    /// Create a snapshot store. The backup directory is created if absent.
    pub fn new(
        data_file: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
        max_backups: usize,
    ) -> Result<Self> {
        let backups = BackupRotation::new(backup_dir, max_backups);
        fs::create_dir_all(backups.dir())?;
        Ok(Self {
            data_file: data_file.into(),
            backups,
        })
    }

    /// The durable file path.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// The backup rotation over this store's backup directory.
    pub fn backups(&self) -> &BackupRotation {
        &self.backups
    }

    /// Load the durable file.
    ///
    /// An absent file yields an empty report. An unparseable file is
    /// preserved via [`BackupRotation::capture`], logged, and yields an
    /// empty report with `recovered_from_corruption` set — callers can
    /// also detect the recovery through the backup history. An I/O
    /// failure reading an existing file is a hard error.
    pub fn load(&self) -> Result<LoadReport> {
        if !self.data_file.exists() {
            return Ok(LoadReport::default());
        }
        let raw = fs::read_to_string(&self.data_file)?;
        let parsed: BTreeMap<String, StoredRecord> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::error!(
                    file = %self.data_file.display(),
                    %err,
                    "durable file failed to parse; preserving a copy and starting empty"
                );
                self.backups.capture(&self.data_file);
                return Ok(LoadReport {
                    recovered_from_corruption: true,
                    ..LoadReport::default()
                });
            }
        };

        let now = Utc::now();
        let mut migrated = 0;
        let records = parsed
            .into_iter()
            .map(|(key, stored)| {
                let (record, was_legacy) = stored.into_record(now);
                if was_legacy {
                    migrated += 1;
                }
                (key, record)
            })
            .collect();
        Ok(LoadReport {
            records,
            migrated,
            recovered_from_corruption: false,
        })
    }

    /// Persist the full record map.
    ///
    /// Captures a backup of the current durable file first (best
    /// effort), then writes the new document atomically. An error here
    /// means the mutation did not durably succeed.
    pub fn save(&self, records: &BTreeMap<String, Record>) -> Result<()> {
        self.backups.capture(&self.data_file);

        let json = serde_json::to_vec_pretty(records)?;
        let dir = self.data_file.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.data_file)
            .map_err(|err| Error::Io(err.error))?;
        Ok(())
    }
}
