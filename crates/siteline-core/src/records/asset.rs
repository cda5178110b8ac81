//! Assets under maintenance

use crate::identifiers::AssetId;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Operational status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    /// In service.
    Operational,
    /// Taken out for maintenance work.
    #[serde(rename = "Under Maintenance")]
    UnderMaintenance,
    /// Out of service pending repair or disposal.
    #[serde(rename = "Out of Service")]
    OutOfService,
}

/// A physical asset tracked by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Generated identifier (`AST` + three digits).
    pub id: AssetId,
    /// Display name.
    pub name: String,
    /// Site the asset belongs to; used by site-scoped queries.
    pub site: String,
    /// Equipment category (pump, conveyor, HVAC, ...).
    pub category: String,
    /// Current operational status.
    pub status: AssetStatus,
    /// Creation time.
    pub created_at: Timestamp,
}

/// Caller-supplied fields for registering an asset.
#[derive(Debug, Clone)]
pub struct NewAsset {
    /// Display name.
    pub name: String,
    /// Owning site.
    pub site: String,
    /// Equipment category.
    pub category: String,
    /// Initial status.
    pub status: AssetStatus,
}
