//! The bounded audit log
//!
//! Newest entries sit at the front. Memory keeps the most recent
//! [`AuditLog::MEMORY_RETENTION`] entries; each write persists the most
//! recent [`AuditLog::DURABLE_RETENTION`] through the durable port, the
//! same write-through best-effort contract the record store uses.

use crate::entry::{AuditDraft, AuditEntry};
use crate::{AuditAction, ResourceKind};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use siteline_core::{Durable, UserId, WriteError};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::warn;

/// Durable key holding the persisted audit window.
pub const AUDIT_KEY: &str = "audit-log";

/// Conjunctive retrieval filters; unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Acting principal.
    pub user_id: Option<UserId>,
    /// Action kind.
    pub action: Option<AuditAction>,
    /// Resource family.
    pub resource: Option<ResourceKind>,
    /// Specific record.
    pub resource_id: Option<String>,
    /// Inclusive window start.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive window end.
    pub end: Option<DateTime<Utc>>,
    /// Result cap, applied after all other filters.
    pub limit: Option<usize>,
}

impl AuditQuery {
    /// Match only this principal.
    pub fn by_user(mut self, user: impl Into<UserId>) -> Self {
        self.user_id = Some(user.into());
        self
    }

    /// Match only this action.
    pub fn by_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Match only this resource family.
    pub fn by_resource(mut self, resource: ResourceKind) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Match only this record.
    pub fn by_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Match entries inside the inclusive window.
    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Cap the result count.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, entry: &AuditEntry) -> bool {
        if let Some(user) = &self.user_id {
            if &entry.user_id != user {
                return false;
            }
        }
        if let Some(action) = self.action {
            if entry.action != action {
                return false;
            }
        }
        if let Some(resource) = self.resource {
            if entry.resource != resource {
                return false;
            }
        }
        if let Some(resource_id) = &self.resource_id {
            if entry.resource_id.as_deref() != Some(resource_id.as_str()) {
                return false;
            }
        }
        if let Some(start) = self.start {
            if entry.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if entry.timestamp > end {
                return false;
            }
        }
        true
    }
}

/// Export rendering for the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array.
    Json,
    /// Quoted CSV with a fixed header.
    Csv,
}

/// Append-only audit log with bounded retention.
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
    durable: Arc<dyn Durable>,
    last_write_error: Option<WriteError>,
}

fn generate_id(ts_ms: i64) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("audit-{ts_ms}-{}", suffix.to_lowercase())
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

impl AuditLog {
    /// In-memory retention window.
    pub const MEMORY_RETENTION: usize = 1000;

    /// Durable retention window; intentionally smaller than memory to
    /// bound storage cost.
    pub const DURABLE_RETENTION: usize = 100;

    /// Open the log, reloading the persisted window if present.
    pub fn open(durable: Arc<dyn Durable>) -> Self {
        let entries = match durable.get(AUDIT_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<AuditEntry>>(&raw) {
                Ok(entries) => entries.into(),
                Err(err) => {
                    warn!(key = AUDIT_KEY, error = %err, "malformed audit state, starting empty");
                    VecDeque::new()
                }
            },
            None => VecDeque::new(),
        };
        Self {
            entries,
            durable,
            last_write_error: None,
        }
    }

    /// Number of entries currently held in memory.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the in-memory log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent durable write failure, if any.
    pub fn last_write_error(&self) -> Option<&WriteError> {
        self.last_write_error.as_ref()
    }

    /// Append an entry, assigning its ID and timestamp.
    ///
    /// Prepends (newest first), truncates memory to the retention
    /// window, and persists the durable window. A failed persist is
    /// logged and recorded but the entry stands.
    pub fn log(&mut self, draft: AuditDraft) -> AuditEntry {
        let timestamp = Utc::now();
        let entry = AuditEntry {
            id: generate_id(timestamp.timestamp_millis()),
            timestamp,
            user_id: draft.actor.user_id,
            user_email: draft.actor.email,
            user_name: draft.actor.name,
            action: draft.action,
            resource: draft.resource,
            resource_id: draft.resource_id,
            details: draft.details,
        };
        self.entries.push_front(entry.clone());
        self.entries.truncate(Self::MEMORY_RETENTION);
        self.persist();
        entry
    }

    fn persist(&mut self) {
        let window: Vec<&AuditEntry> =
            self.entries.iter().take(Self::DURABLE_RETENTION).collect();
        let result = serde_json::to_string(&window)
            .map_err(|err| WriteError::serialize(AUDIT_KEY, err))
            .and_then(|json| self.durable.put(AUDIT_KEY, &json));
        if let Err(err) = result {
            warn!(key = AUDIT_KEY, error = %err, "audit write failed; in-memory trail remains authoritative");
            self.last_write_error = Some(err);
        }
    }

    /// Entries matching the query, newest first.
    pub fn query(&self, query: &AuditQuery) -> Vec<AuditEntry> {
        let matched = self.entries.iter().filter(|entry| query.matches(entry));
        match query.limit {
            Some(limit) => matched.take(limit).cloned().collect(),
            None => matched.cloned().collect(),
        }
    }

    /// The full in-memory trail, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter()
    }

    /// Render the full in-memory trail.
    pub fn export(&self, format: ExportFormat) -> String {
        match format {
            ExportFormat::Json => {
                let all: Vec<&AuditEntry> = self.entries.iter().collect();
                serde_json::to_string_pretty(&all).unwrap_or_else(|_| "[]".to_string())
            }
            ExportFormat::Csv => {
                let mut out =
                    String::from("Timestamp,User,Action,Resource Type,Resource ID,Details\n");
                for entry in &self.entries {
                    let details =
                        serde_json::to_string(&entry.details).unwrap_or_else(|_| "{}".to_string());
                    let fields = [
                        entry
                            .timestamp
                            .to_rfc3339_opts(SecondsFormat::Millis, true),
                        format!("{} ({})", entry.user_name, entry.user_email),
                        entry.action.to_string(),
                        entry.resource.to_string(),
                        entry.resource_id.clone().unwrap_or_default(),
                        details,
                    ];
                    let row: Vec<String> = fields.iter().map(|f| csv_quote(f)).collect();
                    out.push_str(&row.join(","));
                    out.push('\n');
                }
                out
            }
        }
    }

    /// Erase the trail from memory and durable storage.
    ///
    /// The only erase path; individual entries are never deleted.
    pub fn clear(&mut self) -> Result<(), WriteError> {
        self.entries.clear();
        self.durable.remove(AUDIT_KEY)
    }
}
