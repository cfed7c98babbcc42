//! Durability layer for tagstore.
//!
//! This crate owns the on-disk footprint of the store:
//! - Snapshot persistence: load-all/save-all of the single JSON
//!   document, with legacy-shape migration and atomic replacement
//! - Corruption self-healing: an unparseable durable file is preserved
//!   and the store starts empty instead of failing startup
//! - Backup rotation: timestamped copies before every write, pruned to
//!   a bounded retention

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backup;
pub mod snapshot;

pub use backup::{BackupRotation, BACKUP_EXTENSION, BACKUP_PREFIX};
pub use snapshot::{LoadReport, SnapshotStore};
