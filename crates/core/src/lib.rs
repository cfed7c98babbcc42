//! Core types for the tagstore record store.
//!
//! This crate defines the fundamental pieces shared by the durability
//! and engine layers:
//! - [`Record`]: one stored entry (value, timestamps, tags)
//! - [`StoredRecord`]: the on-disk shape with legacy-upgrade decoding
//! - [`StoreConfig`]: injected paths and limits
//! - [`Error`] / [`Result`]: the unified error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod record;
pub mod validate;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use record::{normalize_tags, Record, StoredRecord};
pub use validate::{validate_key, validate_value};
