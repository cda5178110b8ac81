//! Read-only projections
//!
//! Both projections are recomputed on every call, O(n) over each
//! collection; nothing here is cached or persisted.

use crate::store::RecordStore;
use siteline_core::{VariationStatus, WorkOrderId, WorkOrderStatus};

/// Estimated and actual cost booked against one work order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JobCost {
    /// Sum of estimated costs.
    pub estimated: f64,
    /// Sum of actual costs.
    pub actual: f64,
}

impl JobCost {
    /// Overrun (positive) or saving (negative) against the estimate.
    pub fn variance(&self) -> f64 {
        self.actual - self.estimated
    }
}

/// Aggregate counts and rates across all collections.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Total work orders.
    pub work_orders: usize,
    /// Work orders with `Complete` status.
    pub completed_work_orders: usize,
    /// Completed share of all work orders, as a percentage. Zero when
    /// there are no work orders.
    pub completion_rate: f64,
    /// Total assets.
    pub assets: usize,
    /// Total documents.
    pub documents: usize,
    /// Total variations.
    pub variations: usize,
    /// Variations still awaiting a decision.
    pub pending_variations: usize,
    /// Sum of estimated costs across every cost entry.
    pub estimated_cost: f64,
    /// Sum of actual costs across every cost entry.
    pub actual_cost: f64,
    /// `actual_cost - estimated_cost`.
    pub cost_variance: f64,
}

impl RecordStore {
    /// Total estimated/actual cost for one work order's cost entries.
    pub fn total_cost_by_job(&self, job: &WorkOrderId) -> JobCost {
        self.cost_entries_by_job(job)
            .into_iter()
            .fold(JobCost::default(), |acc, entry| JobCost {
                estimated: acc.estimated + entry.estimated_cost,
                actual: acc.actual + entry.actual_cost,
            })
    }

    /// Aggregate dashboard statistics across all collections.
    pub fn dashboard_stats(&self) -> DashboardStats {
        let work_orders = self.work_orders().len();
        let completed_work_orders = self
            .work_orders()
            .iter()
            .filter(|w| w.status == WorkOrderStatus::Complete)
            .count();
        let completion_rate = if work_orders == 0 {
            0.0
        } else {
            completed_work_orders as f64 / work_orders as f64 * 100.0
        };

        let (estimated_cost, actual_cost) = self
            .cost_entries()
            .iter()
            .fold((0.0, 0.0), |(est, act), entry| {
                (est + entry.estimated_cost, act + entry.actual_cost)
            });

        DashboardStats {
            work_orders,
            completed_work_orders,
            completion_rate,
            assets: self.assets().len(),
            documents: self.documents().len(),
            variations: self.variations().len(),
            pending_variations: self
                .variations()
                .iter()
                .filter(|v| v.status == VariationStatus::Pending)
                .count(),
            estimated_cost,
            actual_cost,
            cost_variance: actual_cost - estimated_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use std::sync::Arc;

    #[test]
    fn test_total_cost_by_job_sums_entries() {
        let store = RecordStore::open(Arc::new(MemoryBackend::new()));
        // Seed books CST001 (1200/1350) and CST002 (600/600) on WO0001.
        let cost = store.total_cost_by_job(&"WO0001".into());
        assert_eq!(cost.estimated, 1800.0);
        assert_eq!(cost.actual, 1950.0);
        assert_eq!(cost.variance(), 150.0);

        let none = store.total_cost_by_job(&"WO0002".into());
        assert_eq!(none, JobCost::default());
    }

    #[test]
    fn test_dashboard_stats_over_seed() {
        let store = RecordStore::open(Arc::new(MemoryBackend::new()));
        let stats = store.dashboard_stats();
        assert_eq!(stats.work_orders, 3);
        assert_eq!(stats.completed_work_orders, 1);
        assert!((stats.completion_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.pending_variations, 1);
        assert_eq!(stats.cost_variance, 150.0);
    }
}
