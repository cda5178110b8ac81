//! Visibility filtering
//!
//! One pure predicate per resource type, parameterized by tier. A record
//! is visible when any clause for its tier matches; clauses have no
//! precedence. Filtering never mutates the input and preserves relative
//! order.

use crate::profile::{AccessProfile, DataAccessTier};
use siteline_core::{Asset, Document, Variation, WorkOrder};

/// Per-resource visibility predicate against one profile.
pub trait Visible {
    /// Whether the given profile may see this record.
    fn visible_to(&self, profile: &AccessProfile) -> bool;
}

impl Visible for WorkOrder {
    fn visible_to(&self, profile: &AccessProfile) -> bool {
        match profile.tier {
            DataAccessTier::All => true,
            DataAccessTier::Managed => {
                profile.assigned_work_orders.contains(&self.id)
                    || profile.managed_users.contains(&self.assigned_to)
                    || self.created_by == profile.user_id
            }
            DataAccessTier::Assigned => {
                profile.assigned_work_orders.contains(&self.id)
                    || self.assigned_to == profile.user_id
            }
            DataAccessTier::ReadOnly => false,
        }
    }
}

impl Visible for Asset {
    fn visible_to(&self, profile: &AccessProfile) -> bool {
        match profile.tier {
            DataAccessTier::All => true,
            DataAccessTier::Managed => profile.assigned_assets.contains(&self.id),
            DataAccessTier::Assigned | DataAccessTier::ReadOnly => false,
        }
    }
}

impl Visible for Document {
    fn visible_to(&self, profile: &AccessProfile) -> bool {
        let allow_listed = profile.assigned_documents.contains(&self.id);
        let on_assigned_job = self
            .job_id
            .as_ref()
            .is_some_and(|job| profile.assigned_work_orders.contains(job));

        match profile.tier {
            DataAccessTier::All => true,
            DataAccessTier::Managed => allow_listed,
            DataAccessTier::Assigned => allow_listed || on_assigned_job,
            DataAccessTier::ReadOnly => allow_listed,
        }
    }
}

impl Visible for Variation {
    fn visible_to(&self, profile: &AccessProfile) -> bool {
        let on_assigned_job = profile.assigned_work_orders.contains(&self.job_id);
        match profile.tier {
            DataAccessTier::All => true,
            DataAccessTier::Managed => {
                on_assigned_job || profile.managed_users.contains(&self.requested_by)
            }
            DataAccessTier::Assigned => {
                profile.assigned_variations.contains(&self.id)
                    || self.requested_by == profile.user_id
                    || on_assigned_job
            }
            DataAccessTier::ReadOnly => false,
        }
    }
}

/// Filter a collection down to what a profile may see.
///
/// An absent profile yields an empty result for every resource type
/// (deny-by-default). The result is a new subsequence preserving the
/// input's relative order.
pub fn scope<T: Visible + Clone>(profile: Option<&AccessProfile>, items: &[T]) -> Vec<T> {
    match profile {
        Some(profile) => items
            .iter()
            .filter(|item| item.visible_to(profile))
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Role;
    use siteline_core::time::from_epoch_secs;
    use siteline_core::{Delta, Priority, VariationStatus, WorkOrderStatus};

    fn work_order(id: &str, assigned_to: &str, created_by: &str) -> WorkOrder {
        WorkOrder {
            id: id.into(),
            title: format!("job {id}"),
            description: String::new(),
            status: WorkOrderStatus::Pending,
            priority: Priority::Medium,
            assigned_to: assigned_to.into(),
            created_by: created_by.into(),
            checklist_id: None,
            attachments: Vec::new(),
            created_at: from_epoch_secs(1_700_000_000),
            updated_at: from_epoch_secs(1_700_000_000),
        }
    }

    fn document(id: &str, job: Option<&str>) -> Document {
        Document {
            id: id.into(),
            name: format!("{id}.pdf"),
            job_id: job.map(Into::into),
            asset_id: None,
            uploaded_by: "U1".into(),
            uploaded_at: from_epoch_secs(1_700_000_000),
        }
    }

    fn variation(id: &str, job: &str, requested_by: &str) -> Variation {
        Variation {
            id: id.into(),
            job_id: job.into(),
            version: 1,
            title: format!("variation {id}"),
            requested_by: requested_by.into(),
            status: VariationStatus::Pending,
            cost: Delta::new(100.0, 10.0),
            duration_days: Delta::new(1.0, 0.0),
            approved_by: None,
            approval_date: None,
            created_at: from_epoch_secs(1_700_000_000),
        }
    }

    fn profile(tier: DataAccessTier) -> AccessProfile {
        AccessProfile::new("U5", "u5@siteline.example", "U Five", Role::Supervisor, tier)
    }

    #[test]
    fn test_all_tier_returns_collection_unchanged() {
        let orders = vec![
            work_order("WO0001", "U9", "U5"),
            work_order("WO0002", "U2", "U2"),
            work_order("WO0003", "U3", "U3"),
        ];
        let all = profile(DataAccessTier::All);
        assert_eq!(scope(Some(&all), &orders), orders);
    }

    #[test]
    fn test_absent_profile_sees_nothing() {
        let orders = vec![work_order("WO0001", "U9", "U5")];
        let docs = vec![document("DOC001", None)];
        assert!(scope::<WorkOrder>(None, &orders).is_empty());
        assert!(scope::<Document>(None, &docs).is_empty());
    }

    #[test]
    fn test_managed_work_order_clauses_are_ored() {
        // The end-to-end scenario: allow-listed and managed-user clauses
        // both match WO0001; WO0002 matches neither.
        let profile = profile(DataAccessTier::Managed)
            .with_work_orders(["WO0001"])
            .with_managed_users(["U9"]);
        let orders = vec![work_order("WO0001", "U9", "U5"), work_order("WO0002", "U2", "U2")];

        let visible = scope(Some(&profile), &orders);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "WO0001");
    }

    #[test]
    fn test_managed_sees_own_created_orders() {
        let profile = profile(DataAccessTier::Managed);
        let orders = vec![work_order("WO0008", "U2", "U5")];
        assert_eq!(scope(Some(&profile), &orders).len(), 1);
    }

    #[test]
    fn test_assigned_documents_via_job_grant() {
        let profile = AccessProfile::new(
            "U9",
            "u9@siteline.example",
            "U Nine",
            Role::Operative,
            DataAccessTier::Assigned,
        )
        .with_work_orders(["WO0001"])
        .with_documents(["DOC003"]);

        let docs = vec![
            document("DOC001", Some("WO0001")),
            document("DOC002", Some("WO0002")),
            document("DOC003", None),
        ];
        let visible = scope(Some(&profile), &docs);
        let ids: Vec<&str> = visible.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["DOC001", "DOC003"]);
    }

    #[test]
    fn test_readonly_sees_only_allow_listed_documents() {
        let profile = AccessProfile::new(
            "U7",
            "client@siteline.example",
            "Cli Ent",
            Role::Client,
            DataAccessTier::ReadOnly,
        )
        .with_documents(["DOC002"])
        .with_work_orders(["WO0001"]);

        let orders = vec![work_order("WO0001", "U9", "U5")];
        let docs = vec![document("DOC001", Some("WO0001")), document("DOC002", None)];
        let variations = vec![variation("VAR001", "WO0001", "U9")];

        assert!(scope(Some(&profile), &orders).is_empty());
        assert!(scope(Some(&profile), &variations).is_empty());
        let visible = scope(Some(&profile), &docs);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.as_str(), "DOC002");
    }

    #[test]
    fn test_variation_visibility_clauses() {
        let managed = profile(DataAccessTier::Managed)
            .with_work_orders(["WO0001"])
            .with_managed_users(["U3"]);
        let variations = vec![
            variation("VAR001", "WO0001", "U9"), // via assigned job
            variation("VAR002", "WO0002", "U3"), // via managed requester
            variation("VAR003", "WO0002", "U8"), // neither
        ];
        let ids: Vec<String> = scope(Some(&managed), &variations)
            .iter()
            .map(|v| v.id.to_string())
            .collect();
        assert_eq!(ids, ["VAR001", "VAR002"]);

        let assigned = AccessProfile::new(
            "U9",
            "u9@siteline.example",
            "U Nine",
            Role::Operative,
            DataAccessTier::Assigned,
        )
        .with_variations(["VAR003"]);
        let ids: Vec<String> = scope(Some(&assigned), &variations)
            .iter()
            .map(|v| v.id.to_string())
            .collect();
        // VAR001 via own request, VAR003 via allow-list.
        assert_eq!(ids, ["VAR001", "VAR003"]);
    }

    #[test]
    fn test_assets_invisible_below_managed() {
        let asset = Asset {
            id: "AST001".into(),
            name: "Conveyor".to_string(),
            site: "North Plant".to_string(),
            category: "Conveyor".to_string(),
            status: siteline_core::AssetStatus::Operational,
            created_at: from_epoch_secs(1_700_000_000),
        };
        let assets = vec![asset];

        let managed = profile(DataAccessTier::Managed).with_assets(["AST001"]);
        assert_eq!(scope(Some(&managed), &assets).len(), 1);

        let assigned = profile(DataAccessTier::Assigned).with_assets(["AST001"]);
        assert!(scope(Some(&assigned), &assets).is_empty());
    }

    #[test]
    fn test_filtering_preserves_order() {
        let profile = profile(DataAccessTier::Managed).with_managed_users(["U2", "U9"]);
        let orders = vec![
            work_order("WO0005", "U9", "U1"),
            work_order("WO0002", "U2", "U1"),
            work_order("WO0009", "U9", "U1"),
        ];
        let scoped = scope(Some(&profile), &orders);
        let ids: Vec<&str> = scoped.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["WO0005", "WO0002", "WO0009"]);
    }
}
