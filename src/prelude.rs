//! Convenient imports for tagstore.
//!
//! Re-exports the types most callers need:
//!
//! ```no_run
//! use tagstore::prelude::*;
//!
//! # fn main() -> tagstore::Result<()> {
//! let store = RecordStore::open(StoreConfig::new("store.json", "backups"))?;
//! store.add("key", "value", &[])?;
//! # Ok(())
//! # }
//! ```

// Main entry point
pub use crate::RecordStore;

// Configuration
pub use crate::StoreConfig;

// Error handling
pub use crate::{Error, Result};

// Record type
pub use crate::Record;
