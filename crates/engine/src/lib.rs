//! Record store engine for tagstore.
//!
//! This crate holds [`RecordStore`], the single owner of the key→record
//! mapping. All mutations serialize through one write lock around the
//! full mutate-then-persist sequence; persistence is a synchronous side
//! effect of every mutation, never a scheduled process.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod store;

pub use store::RecordStore;
