//! Durable persistence port
//!
//! Collections and the audit trail persist as JSON strings under stable
//! keys. Writes return an explicit `Result` so callers can observe
//! durability failures, but per the layer's error model a failed write
//! never rolls back the in-memory mutation; in-memory state stays
//! authoritative for the rest of the session.

use thiserror::Error;

/// A durable write failure.
///
/// Carries rendered reasons rather than source errors so reports can be
/// cloned into health snapshots and asserted in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// The backing medium rejected the write.
    #[error("write to key {key} failed: {reason}")]
    Io {
        /// Stable key being written.
        key: String,
        /// Rendered cause.
        reason: String,
    },

    /// The value could not be serialized.
    #[error("serialize for key {key} failed: {reason}")]
    Serialize {
        /// Stable key being written.
        key: String,
        /// Rendered cause.
        reason: String,
    },
}

impl WriteError {
    /// Build an IO write error.
    pub fn io(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Io {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a serialization error.
    pub fn serialize(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Serialize {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Key/value persistence port for collections and the audit trail.
///
/// One JSON array per collection under one stable key. Reads are
/// best-effort: an unreadable value is reported as absent and the caller
/// falls back to its compiled-in seed.
pub trait Durable: Send + Sync {
    /// Write `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> Result<(), WriteError>;

    /// Read the value under `key`, `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Remove the value under `key`; removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), WriteError>;
}
