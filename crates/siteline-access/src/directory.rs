//! Identity-to-profile resolution
//!
//! The directory is a precomputed map from normalized (trimmed,
//! lower-cased) email to profile. Absence means "no access": callers
//! must treat a `None` resolution as deny-by-default, never as
//! unrestricted access.

use crate::profile::AccessProfile;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Directory construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// Two profiles normalize to the same identity.
    #[error("duplicate identity in directory: {0}")]
    DuplicateIdentity(String),
}

/// Precomputed identity → profile mapping.
#[derive(Debug, Clone, Default)]
pub struct AccessDirectory {
    profiles: HashMap<String, AccessProfile>,
}

/// Normalize a login identity for lookup.
fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl AccessDirectory {
    /// Build a directory, rejecting duplicate normalized identities.
    ///
    /// No two profiles may exist for the same normalized identity; that
    /// integrity invariant is enforced here, at construction, so runtime
    /// resolution never has to disambiguate.
    pub fn new(profiles: impl IntoIterator<Item = AccessProfile>) -> Result<Self, DirectoryError> {
        let mut map = HashMap::new();
        for profile in profiles {
            let key = normalize(&profile.email);
            if map.insert(key.clone(), profile).is_some() {
                return Err(DirectoryError::DuplicateIdentity(key));
            }
        }
        Ok(Self { profiles: map })
    }

    /// Resolve a principal by email, case-insensitively.
    pub fn resolve(&self, email: &str) -> Option<&AccessProfile> {
        let resolved = self.profiles.get(&normalize(email));
        if resolved.is_none() {
            debug!(email = %normalize(email), "identity not in directory");
        }
        resolved
    }

    /// Number of registered profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
