//! Stable durable keys
//!
//! One JSON array per collection under one key. Renaming a key orphans
//! previously persisted data, so these are part of the storage contract.

/// Work order collection key.
pub const WORK_ORDERS: &str = "work-orders";

/// Asset collection key.
pub const ASSETS: &str = "assets";

/// Document collection key.
pub const DOCUMENTS: &str = "documents";

/// Variation collection key.
pub const VARIATIONS: &str = "variations";

/// Attendance collection key.
pub const ATTENDANCE: &str = "attendance";

/// Productivity collection key.
pub const PRODUCTIVITY: &str = "productivity";

/// Cost entry collection key.
pub const COST_ENTRIES: &str = "cost-entries";
