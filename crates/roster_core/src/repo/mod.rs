//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the on-device key-value slot contract.
//! - Isolate SQLite query details from store/business orchestration.
//!
//! # Invariants
//! - Slot writes are single-key, last-writer-wins.
//! - Repository construction verifies the migrated schema before use.

pub mod slot_repo;
