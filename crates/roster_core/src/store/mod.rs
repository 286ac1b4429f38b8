//! Record store owning the authoritative user collection.
//!
//! # Responsibility
//! - Keep the in-memory user list as the single source of truth.
//! - Mirror every committed mutation to the persistent slot (write-through).
//!
//! # Invariants
//! - Persisted storage always reflects the last committed in-memory state.
//! - Mutations validate records before any persistence write.

pub mod user_store;
