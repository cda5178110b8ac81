//! # Siteline Access - Policy, Filtering, and Gates
//!
//! **Purpose**: Decide, per authenticated principal, which records of
//! each resource type are visible and which privileged actions are
//! allowed.
//!
//! Three pieces share one [`AccessProfile`]:
//!
//! - the **directory** resolves a principal's email to its profile
//!   (deny-by-default: an unknown identity has no access),
//! - the **filter engine** scopes raw collections down to the subset a
//!   profile may see, per resource type,
//! - the **capability gate** answers point queries ("may this principal
//!   approve this work order?") as plain booleans.
//!
//! Everything here is pure over the profile and the input collections;
//! this crate performs no IO and never mutates what it filters.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Identity-to-profile resolution
pub mod directory;

/// Visibility filtering per resource type and tier
pub mod filter;

/// Access profiles, roles, tiers, and the capability gate
pub mod profile;

pub use directory::{AccessDirectory, DirectoryError};
pub use filter::{scope, Visible};
pub use profile::{AccessProfile, DataAccessTier, Role};
