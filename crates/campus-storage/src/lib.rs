//! Snapshot storage for campus store graphs.
//!
//! Converts the live, cross-referenced campus into a flat, identifier-only
//! snapshot and back. Saving decomposes every store into per-kind record
//! collections; loading parses the records and relinks them in fixed
//! dependency order, skipping (and reporting) anything with a dangling
//! reference rather than aborting the load.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum
//! - [`record`]: flat record structs, one per entity kind, plus [`record::Snapshot`]
//! - [`convert`]: campus -> snapshot decomposition
//! - [`link`]: snapshot -> campus relinking with a [`link::LoadReport`]
//! - [`traits`]: the [`traits::SnapshotStore`] contract
//! - [`memory`]: in-memory backend
//! - [`file`]: one-JSON-file-per-kind backend

pub mod convert;
pub mod error;
pub mod file;
pub mod link;
pub mod memory;
pub mod record;
pub mod traits;

// Re-export key types for ergonomic use.
pub use convert::decompose;
pub use error::StorageError;
pub use file::FlatFileStore;
pub use link::{recompose, DanglingReference, LoadReport};
pub use memory::InMemoryStore;
pub use record::Snapshot;
pub use traits::SnapshotStore;
