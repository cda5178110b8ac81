//! Facade error types

use siteline_access::DirectoryError;
use siteline_core::WriteError;
use siteline_store::StoreError;
use thiserror::Error;

/// Failures while wiring the application together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// The durable backend could not be opened.
    #[error(transparent)]
    Storage(#[from] WriteError),

    /// The access directory rejected its profiles.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Failures from gated session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The email resolved to no profile; deny-by-default.
    #[error("unknown identity: {0}")]
    UnknownIdentity(String),

    /// The capability gate refused the action.
    #[error("access denied: {action} on {resource}")]
    Denied {
        /// The refused action.
        action: String,
        /// What it targeted.
        resource: String,
    },

    /// The addressed record does not exist.
    #[error(transparent)]
    NotFound(#[from] StoreError),
}
