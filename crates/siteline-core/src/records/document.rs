//! Documents attached to jobs and assets

use crate::identifiers::{AssetId, DocumentId, UserId, WorkOrderId};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// An uploaded document.
///
/// A document relates to a work order, an asset, or both; those relations
/// drive the assigned-tier visibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Generated identifier (`DOC` + three digits).
    pub id: DocumentId,
    /// File name as uploaded.
    pub name: String,
    /// Work order this document belongs to, if any.
    pub job_id: Option<WorkOrderId>,
    /// Asset this document belongs to, if any.
    pub asset_id: Option<AssetId>,
    /// Principal who uploaded it.
    pub uploaded_by: UserId,
    /// Upload time.
    pub uploaded_at: Timestamp,
}

/// Caller-supplied fields for an upload.
#[derive(Debug, Clone)]
pub struct NewDocument {
    /// File name.
    pub name: String,
    /// Related work order.
    pub job_id: Option<WorkOrderId>,
    /// Related asset.
    pub asset_id: Option<AssetId>,
    /// Uploader.
    pub uploaded_by: UserId,
}
