//! # Tagstore
//!
//! Persistent tagged key-value store with crash-safe backup rotation.
//!
//! Tagstore keeps one authoritative in-memory map of key→record and
//! persists the whole document on every mutation, rotating timestamped
//! backups with bounded retention. Records carry a string value,
//! creation/update timestamps, and a sorted set of tags; queries cover
//! exact lookup, paginated listing (tag-filterable), case-insensitive
//! substring search, and the tag universe.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tagstore::prelude::*;
//!
//! # fn main() -> tagstore::Result<()> {
//! let config = StoreConfig::new("data/store.json", "data/backups");
//! let store = RecordStore::open(config)?;
//!
//! store.add("greeting", "hello", &["demo", "en"])?;
//! store.add_tag("greeting", "casual")?;
//!
//! let (page, total) = store.list(1, None, Some("demo"));
//! assert_eq!(total, 1);
//! assert_eq!(page[0].1.value, "hello");
//!
//! for (key, record) in store.search("hell") {
//!     println!("{key}: {}", record.value);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Durability model
//!
//! The durable file is a single JSON document, the source of truth
//! across restarts. Every mutation backs up the previous document, then
//! atomically rewrites it; legacy document shapes are migrated in place
//! at load; an unparseable document is preserved in the backup
//! directory and the store self-heals to empty rather than failing
//! startup.

#![warn(missing_docs)]

pub mod prelude;

// Re-export the public surface of the member crates
pub use tagstore_core::{
    normalize_tags, Error, Record, Result, StoreConfig, StoredRecord,
};
pub use tagstore_durability::{BackupRotation, LoadReport, SnapshotStore};
pub use tagstore_engine::RecordStore;
