//! Backup rotation for the durable file.
//!
//! Before every durable write the current file is copied into the
//! backup directory under a second-precision timestamped name, then the
//! directory is pruned to the newest N copies. The fixed-width name
//! format makes lexicographic order equal chronological order, so
//! pruning never needs to stat anything.
//!
//! Backup failures never fail the mutation that triggered them: capture
//! and prune errors are logged and swallowed. The primary write decides
//! whether the operation succeeded.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Filename prefix of every backup copy.
pub const BACKUP_PREFIX: &str = "data_backup_";

/// Filename extension of every backup copy.
pub const BACKUP_EXTENSION: &str = ".json";

/// Second-precision, fixed-width stamp: lexicographic == chronological.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Rotating backups of a single durable file.
#[derive(Debug, Clone)]
pub struct BackupRotation {
    dir: PathBuf,
    max_retained: usize,
}

impl BackupRotation {
    /// Create a rotation over `dir`, keeping at most `max_retained` copies.
    pub fn new(dir: impl Into<PathBuf>, max_retained: usize) -> Self {
        Self {
            dir: dir.into(),
            max_retained,
        }
    }

    /// The backup directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `data_file` into the backup directory and prune old copies.
    ///
    /// A no-op when `data_file` does not exist. Failures are logged and
    /// swallowed; the caller's write proceeds regardless.
    pub fn capture(&self, data_file: &Path) {
        if !data_file.exists() {
            return;
        }
        if let Err(err) = fs::create_dir_all(&self.dir) {
            tracing::error!(dir = %self.dir.display(), %err, "cannot create backup directory");
            return;
        }
        let target = self.next_backup_path(Utc::now());
        match fs::copy(data_file, &target) {
            Ok(_) => {
                tracing::debug!(backup = %target.display(), "captured backup");
                self.prune();
            }
            Err(err) => {
                tracing::error!(backup = %target.display(), %err, "backup copy failed");
            }
        }
    }

    /// All backup files, sorted oldest first.
    pub fn list(&self) -> io::Result<Vec<PathBuf>> {
        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if name.starts_with(BACKUP_PREFIX) && name.ends_with(BACKUP_EXTENSION) {
                backups.push(path);
            }
        }
        backups.sort();
        Ok(backups)
    }

    /// Pick the backup path for a capture at `at`.
    ///
    /// Captures within the same second get a fixed-width numeric
    /// suffix. A suffixed name sorts after the plain same-second name
    /// and before the next second, so ordering stays chronological.
    fn next_backup_path(&self, at: DateTime<Utc>) -> PathBuf {
        let stamp = at.format(TIMESTAMP_FORMAT).to_string();
        let name = match self.next_sequence(&stamp) {
            0 => format!("{BACKUP_PREFIX}{stamp}{BACKUP_EXTENSION}"),
            n => format!("{BACKUP_PREFIX}{stamp}_{n:04}{BACKUP_EXTENSION}"),
        };
        self.dir.join(name)
    }

    /// Sequence number for a capture in the second named by `stamp`: 0
    /// when the second is unused, otherwise one past the highest
    /// sequence still on disk. Pruning removes the lowest names first,
    /// so a sequence derived from the survivors never reissues a name
    /// that would sort before an existing backup.
    fn next_sequence(&self, stamp: &str) -> u32 {
        let plain = format!("{BACKUP_PREFIX}{stamp}{BACKUP_EXTENSION}");
        let prefixed = format!("{BACKUP_PREFIX}{stamp}_");
        let mut next = 0;
        for path in self.list().unwrap_or_default() {
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if name == plain {
                next = next.max(1);
            } else if let Some(seq) = name
                .strip_prefix(&prefixed)
                .and_then(|rest| rest.strip_suffix(BACKUP_EXTENSION))
                .and_then(|digits| digits.parse::<u32>().ok())
            {
                next = next.max(seq + 1);
            }
        }
        next
    }

    /// Delete the oldest backups until at most `max_retained` remain.
    fn prune(&self) {
        let mut backups = match self.list() {
            Ok(backups) => backups,
            Err(err) => {
                tracing::error!(dir = %self.dir.display(), %err, "cannot list backups for pruning");
                return;
            }
        };
        while backups.len() > self.max_retained {
            let oldest = backups.remove(0);
            if let Err(err) = fs::remove_file(&oldest) {
                tracing::error!(backup = %oldest.display(), %err, "cannot delete old backup");
            }
        }
    }
}
