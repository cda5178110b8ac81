//! # Siteline Store - Record Store
//!
//! **Purpose**: Typed collections with factory creation, monotonic
//! human-readable ID generation, and write-through best-effort
//! persistence.
//!
//! Every mutation updates the in-memory collection first, then
//! re-serializes the whole collection to the [`Durable`] port. A failed
//! write is logged and recorded but never rolls the mutation back:
//! in-memory state is authoritative for the rest of the session. On cold
//! start, absent or malformed durable state falls back to the
//! compiled-in seed dataset, which is persisted immediately so
//! subsequent reads are stable.
//!
//! [`Durable`]: siteline_core::Durable

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Durable backends (JSON files on disk, in-memory)
pub mod backend;

/// Human-readable ID generation
pub mod ids;

/// Stable durable keys, one per collection
pub mod keys;

/// Compiled-in seed dataset
mod seed;

/// Read-only projections over the collections
pub mod stats;

/// The record store itself
mod store;

pub use backend::{JsonFileBackend, MemoryBackend};
pub use ids::IdSpec;
pub use stats::{DashboardStats, JobCost};
pub use store::{RecordStore, StoreError};
