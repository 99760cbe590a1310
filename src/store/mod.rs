//! In-memory collaborator implementations.
//!
//! Deterministic stand-ins for the platform's record and file storage, used
//! by the tests and demos and serving as the reference semantics for real
//! adapters.

mod memory;

pub use memory::{MemoryFileStore, MemoryRecordStore};
