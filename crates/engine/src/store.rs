//! The record store engine.
//!
//! [`RecordStore`] owns the authoritative key→record map. Every
//! mutation runs validate→mutate→persist under the write guard, so the
//! durable file always reflects the last successful mutation and
//! concurrent mutations cannot interleave (single-writer discipline).
//! Reads take the read guard and clone out — they never block each
//! other and never touch disk.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use parking_lot::RwLock;

use tagstore_core::record::normalize_tags;
use tagstore_core::validate::{validate_key, validate_value};
use tagstore_core::{Record, Result, StoreConfig};
use tagstore_durability::{BackupRotation, SnapshotStore};

/// Persistent tagged key-value store.
///
/// Construct with [`RecordStore::open`]; the store loads (and migrates)
/// the durable file once at startup and keeps memory and disk
/// reconciled on every mutation.
///
/// # Persistence failure
///
/// If the durable write fails after a mutation was applied in memory,
/// the error is returned and the in-memory state is NOT rolled back:
/// memory runs ahead of disk until the next successful mutation
/// rewrites the full document. Callers that need stricter guarantees
/// should treat a persistence error as fatal and restart.
///
/// # Example
///
/// ```no_run
/// use tagstore_core::StoreConfig;
/// use tagstore_engine::RecordStore;
///
/// # fn main() -> tagstore_core::Result<()> {
/// let store = RecordStore::open(StoreConfig::new("data/store.json", "data/backups"))?;
/// store.add("greeting", "hello", &["demo", "en"])?;
/// let (page, total) = store.list(1, None, None);
/// assert_eq!(total, 1);
/// assert_eq!(page[0].0, "greeting");
/// # Ok(())
/// # }
/// ```
pub struct RecordStore {
    config: StoreConfig,
    snapshot: SnapshotStore,
    records: RwLock<BTreeMap<String, Record>>,
    recovered_from_corruption: bool,
}

impl RecordStore {
    /// Open a store with the given configuration.
    ///
    /// Loads the durable file, migrating legacy shapes in place. A
    /// corrupt durable file does not fail the open: it is preserved in
    /// the backup directory and the store starts empty (check
    /// [`RecordStore::recovered_from_corruption`]).
    pub fn open(config: StoreConfig) -> Result<Self> {
        let snapshot =
            SnapshotStore::new(&config.data_file, &config.backup_dir, config.max_backups)?;
        let report = snapshot.load()?;
        tracing::info!(
            records = report.records.len(),
            migrated = report.migrated,
            recovered = report.recovered_from_corruption,
            file = %config.data_file.display(),
            "record store opened"
        );
        Ok(Self {
            config,
            snapshot,
            records: RwLock::new(report.records),
            recovered_from_corruption: report.recovered_from_corruption,
        })
    }

    /// The injected configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The backup rotation over this store's backup directory.
    pub fn backups(&self) -> &BackupRotation {
        self.snapshot.backups()
    }

    /// Whether startup self-healed from an unparseable durable file.
    pub fn recovered_from_corruption(&self) -> bool {
        self.recovered_from_corruption
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a record, or update the value of an existing one.
    ///
    /// For a new key the record is created with the normalized `tags`
    /// (trimmed, deduplicated, sorted). For an existing key only the
    /// value and `updated_at` change — tags are untouched; tag mutation
    /// is a separate operation. Validation failures leave the store
    /// unmodified.
    pub fn add(&self, key: &str, value: &str, tags: &[&str]) -> Result<()> {
        validate_key(key, &self.config)?;
        validate_value(value, &self.config)?;

        let mut records = self.records.write();
        match records.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => entry.get_mut().update_value(value.to_owned()),
            Entry::Vacant(entry) => {
                entry.insert(Record::new(value.to_owned(), normalize_tags(tags)));
            }
        }
        self.snapshot.save(&records)
    }

    /// Delete a record.
    ///
    /// Returns `Ok(false)` with no side effect (and no persist) when
    /// the key is absent.
    pub fn delete(&self, key: &str) -> Result<bool> {
        let mut records = self.records.write();
        if records.remove(key).is_none() {
            return Ok(false);
        }
        self.snapshot.save(&records)?;
        Ok(true)
    }

    /// Add a tag to an existing record.
    ///
    /// The tag is trimmed before insertion. Returns `Ok(false)` with no
    /// side effect when the key is absent, the trimmed tag is empty, or
    /// the tag is already present. On success `updated_at` is bumped
    /// and the store persists.
    pub fn add_tag(&self, key: &str, tag: &str) -> Result<bool> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(false);
        }
        let mut records = self.records.write();
        let Some(record) = records.get_mut(key) else {
            return Ok(false);
        };
        if !record.tags.insert(tag.to_owned()) {
            return Ok(false);
        }
        record.touch();
        self.snapshot.save(&records)?;
        Ok(true)
    }

    /// Remove a tag from an existing record.
    ///
    /// Returns `Ok(false)` with no side effect when the key or the tag
    /// is absent. On success `updated_at` is bumped and the store
    /// persists.
    pub fn delete_tag(&self, key: &str, tag: &str) -> Result<bool> {
        let mut records = self.records.write();
        let Some(record) = records.get_mut(key) else {
            return Ok(false);
        };
        if !record.tags.remove(tag.trim()) {
            return Ok(false);
        }
        record.touch();
        self.snapshot.save(&records)?;
        Ok(true)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Look up a record by exact key.
    pub fn get(&self, key: &str) -> Option<Record> {
        self.records.read().get(key).cloned()
    }

    /// Paginated listing, most-recently-updated first.
    ///
    /// Filters by exact tag membership when `tag` is given, sorts by
    /// `updated_at` descending with a key-ascending tie-break, and
    /// returns the 1-based `page` slice plus the pre-slice total for
    /// pagination math.
    ///
    /// A `page_size` of `None` uses the configured default; zero is
    /// clamped to 1. A `page` of zero is treated as page 1. Pages past
    /// the end return an empty slice, never an error.
    pub fn list(
        &self,
        page: usize,
        page_size: Option<usize>,
        tag: Option<&str>,
    ) -> (Vec<(String, Record)>, usize) {
        let page = page.max(1);
        let page_size = page_size.unwrap_or(self.config.default_page_size).max(1);

        let records = self.records.read();
        let mut entries: Vec<(String, Record)> = records
            .iter()
            .filter(|(_, record)| tag.map_or(true, |t| record.tags.contains(t)))
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect();
        entries.sort_by(|(key_a, a), (key_b, b)| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| key_a.cmp(key_b))
        });

        let total = entries.len();
        let start = (page - 1).saturating_mul(page_size);
        let slice = if start >= total {
            Vec::new()
        } else {
            entries.into_iter().skip(start).take(page_size).collect()
        };
        (slice, total)
    }

    /// Case-insensitive substring search across key, value, and tags.
    ///
    /// Results come back in key order (the map's iteration order),
    /// which is stable across calls. An empty query matches every
    /// record. No pagination is applied — callers slice as needed.
    pub fn search(&self, query: &str) -> Vec<(String, Record)> {
        let needle = query.to_lowercase();
        self.records
            .read()
            .iter()
            .filter(|(key, record)| {
                key.to_lowercase().contains(&needle) || record.matches(&needle)
            })
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect()
    }

    /// The union of every record's tags, sorted ascending, deduplicated.
    pub fn all_tags(&self) -> Vec<String> {
        let records = self.records.read();
        let mut tags = BTreeSet::new();
        for record in records.values() {
            tags.extend(record.tags.iter().cloned());
        }
        tags.into_iter().collect()
    }
}
