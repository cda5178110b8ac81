//! Audit entry types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use siteline_core::UserId;
use std::collections::BTreeMap;
use std::fmt;

/// The privileged action an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Viewed a privileged resource.
    View,
    /// Created a record.
    Create,
    /// Updated a record.
    Update,
    /// Deleted a record.
    Delete,
    /// Approved a record.
    Approve,
    /// Rejected a record.
    Reject,
    /// Submitted a record for approval.
    Submit,
    /// Uploaded a document.
    Upload,
    /// Downloaded or exported data.
    Download,
    /// Signed in.
    Login,
    /// Signed out.
    Logout,
    /// Attempted an action the gate refused.
    AccessDenied,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Submit => "submit",
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::AccessDenied => "access_denied",
        };
        f.write_str(s)
    }
}

/// The resource family an entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A work order.
    WorkOrder,
    /// An asset.
    Asset,
    /// A document.
    Document,
    /// A variation.
    Variation,
    /// An attendance record.
    Attendance,
    /// A productivity record.
    Productivity,
    /// A principal.
    User,
    /// A sign-in session.
    Session,
    /// The audit trail itself.
    AuditLog,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::WorkOrder => "work_order",
            Self::Asset => "asset",
            Self::Document => "document",
            Self::Variation => "variation",
            Self::Attendance => "attendance",
            Self::Productivity => "productivity",
            Self::User => "user",
            Self::Session => "session",
            Self::AuditLog => "audit_log",
        };
        f.write_str(s)
    }
}

/// Action-specific payload of an entry.
///
/// Tagged by action family so each variant carries only the fields
/// meaningful for it; `Note` keeps the escape hatch for one-off context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditDetails {
    /// No extra context.
    None,
    /// Field-level changes applied by an update.
    Update {
        /// Changed fields and their new values.
        changes: BTreeMap<String, serde_json::Value>,
    },
    /// Why a record was rejected.
    Reject {
        /// Reviewer-supplied reason.
        reason: String,
    },
    /// What was uploaded.
    Upload {
        /// File name as uploaded.
        file_name: String,
    },
    /// A status transition.
    StatusChange {
        /// Status before.
        from: String,
        /// Status after.
        to: String,
    },
    /// What a denied principal attempted.
    AccessDenied {
        /// The refused action, rendered for operators.
        attempted: String,
    },
    /// Which export format was produced.
    Export {
        /// `json` or `csv`.
        format: String,
    },
    /// Free-form context.
    Note {
        /// The note itself.
        message: String,
    },
}

impl AuditDetails {
    /// Convenience constructor for a free-form note.
    pub fn note(message: impl Into<String>) -> Self {
        Self::Note {
            message: message.into(),
        }
    }
}

/// Who performed the action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable principal identifier.
    pub user_id: UserId,
    /// Login identity.
    pub email: String,
    /// Display name.
    pub name: String,
}

impl Actor {
    /// Build an actor.
    pub fn new(
        user_id: impl Into<UserId>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            name: name.into(),
        }
    }
}

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Generated identifier, `audit-<epoch-ms>-<random>`.
    pub id: String,
    /// When the entry was logged.
    pub timestamp: DateTime<Utc>,
    /// Acting principal's identifier.
    pub user_id: UserId,
    /// Acting principal's email.
    pub user_email: String,
    /// Acting principal's display name.
    pub user_name: String,
    /// What happened.
    pub action: AuditAction,
    /// Resource family acted on.
    pub resource: ResourceKind,
    /// Specific record, when one applies.
    pub resource_id: Option<String>,
    /// Action-specific payload.
    pub details: AuditDetails,
}

/// Everything the caller supplies; the log assigns ID and timestamp.
#[derive(Debug, Clone)]
pub struct AuditDraft {
    /// Acting principal.
    pub actor: Actor,
    /// What happened.
    pub action: AuditAction,
    /// Resource family acted on.
    pub resource: ResourceKind,
    /// Specific record, when one applies.
    pub resource_id: Option<String>,
    /// Action-specific payload.
    pub details: AuditDetails,
}

impl AuditDraft {
    /// Draft an entry with no details payload.
    pub fn new(actor: Actor, action: AuditAction, resource: ResourceKind) -> Self {
        Self {
            actor,
            action,
            resource,
            resource_id: None,
            details: AuditDetails::None,
        }
    }

    /// Point the draft at a specific record.
    pub fn on(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Attach a details payload.
    pub fn with_details(mut self, details: AuditDetails) -> Self {
        self.details = details;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display_matches_serde_spelling() {
        assert_eq!(AuditAction::AccessDenied.to_string(), "access_denied");
        let json = serde_json::to_string(&AuditAction::AccessDenied).unwrap();
        assert_eq!(json, "\"access_denied\"");
    }

    #[test]
    fn test_details_tagging() {
        let details = AuditDetails::Reject {
            reason: "missing photos".to_string(),
        };
        let json = serde_json::to_string(&details).unwrap();
        assert_eq!(json, r#"{"kind":"reject","reason":"missing photos"}"#);

        let none = serde_json::to_string(&AuditDetails::None).unwrap();
        assert_eq!(none, r#"{"kind":"none"}"#);
    }
}
