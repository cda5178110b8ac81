//! Typed string identifiers
//!
//! Every record family gets its own newtype over the human-readable IDs
//! the dashboard generates (`WO0001`, `VAR001`, ...). Keeping the types
//! distinct means a work-order allow-list cannot be probed with an asset
//! ID by accident.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// View the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a principal (employee, manager, admin).
    UserId
);
string_id!(
    /// Identifier of a work order (`WO0001`).
    WorkOrderId
);
string_id!(
    /// Identifier of an asset (`AST001`).
    AssetId
);
string_id!(
    /// Identifier of a document (`DOC001`).
    DocumentId
);
string_id!(
    /// Identifier of a variation (`VAR001`).
    VariationId
);
string_id!(
    /// Identifier of an attendance record (`ATT001`).
    AttendanceId
);
string_id!(
    /// Identifier of a productivity record (`PRD001`).
    ProductivityId
);
string_id!(
    /// Identifier of a cost entry (`CST001`).
    CostEntryId
);
string_id!(
    /// Identifier of a checklist attached to a work order.
    ChecklistId
);
