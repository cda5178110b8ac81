//! Access profiles and the capability gate
//!
//! A profile is immutable for the duration of a session: one
//! data-visibility tier, explicit capability flags, and per-resource
//! allow-lists that narrow or extend the tier's default visibility.

use serde::{Deserialize, Serialize};
use siteline_core::{AssetId, DocumentId, UserId, VariationId, WorkOrderId};
use std::collections::HashSet;

/// Job function of a principal. Carried for display and audit context;
/// access decisions key off [`DataAccessTier`] and the capability flags,
/// never off the role name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Runs projects and approves work.
    ProjectManager,
    /// Supervises a crew of operatives.
    Supervisor,
    /// Field worker assigned to specific jobs.
    Operative,
    /// External client with read-only document access.
    Client,
}

/// Coarse default-visibility bucket for a profile.
///
/// A closed sum: every filter and gate matches on it exhaustively, so
/// adding a tier is a compile-time error at each decision site rather
/// than a silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataAccessTier {
    /// Sees everything.
    All,
    /// Sees managed people's work plus explicit allow-lists.
    Managed,
    /// Sees own assignments plus explicit allow-lists.
    Assigned,
    /// Sees only explicitly allow-listed documents.
    #[serde(rename = "readonly")]
    ReadOnly,
}

/// Per-principal access decision inputs, resolved once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessProfile {
    /// Stable principal identifier.
    pub user_id: UserId,
    /// Login identity; the directory key is its normalized form.
    pub email: String,
    /// Display name, carried into audit entries.
    pub name: String,
    /// Job function.
    pub role: Role,
    /// Default-visibility tier.
    pub tier: DataAccessTier,
    /// Work orders explicitly granted to this principal.
    pub assigned_work_orders: HashSet<WorkOrderId>,
    /// Assets explicitly granted.
    pub assigned_assets: HashSet<AssetId>,
    /// Documents explicitly granted.
    pub assigned_documents: HashSet<DocumentId>,
    /// Variations explicitly granted.
    pub assigned_variations: HashSet<VariationId>,
    /// Principals whose work a managed-tier profile may see.
    pub managed_users: HashSet<UserId>,
    /// May approve or reject work orders and variations.
    pub can_approve: bool,
    /// May manage people (mark attendance/productivity, export audits).
    pub can_manage_users: bool,
    /// May submit work for approval.
    pub can_submit_for_approval: bool,
    /// May upload documents.
    pub can_upload_documents: bool,
}

impl AccessProfile {
    /// Create a profile with empty allow-lists and all flags off.
    pub fn new(
        user_id: impl Into<UserId>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        tier: DataAccessTier,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            name: name.into(),
            role,
            tier,
            assigned_work_orders: HashSet::new(),
            assigned_assets: HashSet::new(),
            assigned_documents: HashSet::new(),
            assigned_variations: HashSet::new(),
            managed_users: HashSet::new(),
            can_approve: false,
            can_manage_users: false,
            can_submit_for_approval: false,
            can_upload_documents: false,
        }
    }

    /// Grant specific work orders.
    pub fn with_work_orders<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<WorkOrderId>,
    {
        self.assigned_work_orders
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Grant specific assets.
    pub fn with_assets<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<AssetId>,
    {
        self.assigned_assets.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Grant specific documents.
    pub fn with_documents<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DocumentId>,
    {
        self.assigned_documents
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Grant specific variations.
    pub fn with_variations<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<VariationId>,
    {
        self.assigned_variations
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Put principals under this profile's management.
    pub fn with_managed_users<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<UserId>,
    {
        self.managed_users.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Set the capability flags in one go.
    pub fn with_capabilities(
        mut self,
        approve: bool,
        manage_users: bool,
        submit: bool,
        upload: bool,
    ) -> Self {
        self.can_approve = approve;
        self.can_manage_users = manage_users;
        self.can_submit_for_approval = submit;
        self.can_upload_documents = upload;
        self
    }

    // --- capability gate ---
    //
    // Point queries, total over every profile shape. The filter engine
    // is expected to have scoped the candidate ID space already; the
    // gate does not re-check that a record exists.

    /// May this principal edit the given work order?
    pub fn can_edit_work_order(&self, id: &WorkOrderId) -> bool {
        match self.tier {
            DataAccessTier::All => true,
            DataAccessTier::Managed | DataAccessTier::Assigned => {
                self.assigned_work_orders.contains(id)
            }
            DataAccessTier::ReadOnly => false,
        }
    }

    /// May this principal approve or reject the given work order?
    ///
    /// Requires the approve capability first; assigned-tier profiles
    /// never approve regardless of allow-lists.
    pub fn can_approve_work_order(&self, id: &WorkOrderId) -> bool {
        if !self.can_approve {
            return false;
        }
        match self.tier {
            DataAccessTier::All => true,
            DataAccessTier::Managed => self.assigned_work_orders.contains(id),
            DataAccessTier::Assigned | DataAccessTier::ReadOnly => false,
        }
    }

    /// May this principal upload documents?
    pub fn can_upload_documents(&self) -> bool {
        self.can_upload_documents
    }

    /// May this principal submit work for approval?
    pub fn can_submit_for_approval(&self) -> bool {
        self.can_submit_for_approval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn managed_profile() -> AccessProfile {
        AccessProfile::new(
            "U5",
            "super@siteline.example",
            "Sam Super",
            Role::Supervisor,
            DataAccessTier::Managed,
        )
        .with_work_orders(["WO0001"])
        .with_capabilities(true, false, true, true)
    }

    #[test]
    fn test_edit_gate_by_tier() {
        let all = AccessProfile::new("U1", "a@x", "A", Role::Admin, DataAccessTier::All);
        assert!(all.can_edit_work_order(&"WO0042".into()));

        let managed = managed_profile();
        assert!(managed.can_edit_work_order(&"WO0001".into()));
        assert!(!managed.can_edit_work_order(&"WO0002".into()));

        let readonly = AccessProfile::new("U7", "c@x", "C", Role::Client, DataAccessTier::ReadOnly);
        assert!(!readonly.can_edit_work_order(&"WO0001".into()));
    }

    #[test]
    fn test_approve_gate_short_circuits_on_flag() {
        let mut profile = managed_profile();
        assert!(profile.can_approve_work_order(&"WO0001".into()));

        profile.can_approve = false;
        assert!(!profile.can_approve_work_order(&"WO0001".into()));
    }

    #[test]
    fn test_assigned_tier_never_approves() {
        let profile = AccessProfile::new(
            "U9",
            "op@siteline.example",
            "Olive Operative",
            Role::Operative,
            DataAccessTier::Assigned,
        )
        .with_work_orders(["WO0001"])
        .with_capabilities(true, false, true, false);

        // Allow-listed and flagged, but the tier caps approval rights.
        assert!(!profile.can_approve_work_order(&"WO0001".into()));
        assert!(profile.can_edit_work_order(&"WO0001".into()));
    }

    #[test]
    fn test_tier_serde_spellings() {
        let json = serde_json::to_string(&DataAccessTier::ReadOnly).unwrap();
        assert_eq!(json, "\"readonly\"");
        let back: DataAccessTier = serde_json::from_str("\"managed\"").unwrap();
        assert_eq!(back, DataAccessTier::Managed);
    }
}
