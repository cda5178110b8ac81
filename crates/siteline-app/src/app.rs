//! Application lifecycle and wiring

use crate::config::AppConfig;
use crate::error::{AccessError, InitError};
use crate::session::Session;
use parking_lot::Mutex;
use siteline_access::{AccessDirectory, AccessProfile};
use siteline_audit::{Actor, AuditAction, AuditDetails, AuditDraft, AuditLog, ResourceKind};
use siteline_core::Durable;
use siteline_metrics::BonusPolicy;
use siteline_store::{JsonFileBackend, MemoryBackend, RecordStore};
use std::sync::Arc;
use tracing::{info, warn};

/// One wired application instance.
///
/// Owns the record store, audit log, access directory, and bonus policy.
/// There are no globals: tests and hosts build as many independent
/// instances as they need.
pub struct App {
    pub(crate) store: Mutex<RecordStore>,
    pub(crate) audit: Mutex<AuditLog>,
    pub(crate) directory: AccessDirectory,
    pub(crate) policy: BonusPolicy,
}

impl App {
    /// Wire an application from configuration and its access profiles.
    ///
    /// With a `data_dir` the store and audit trail share one JSON-file
    /// backend; otherwise everything lives in memory for the process
    /// lifetime.
    pub fn init(
        config: AppConfig,
        profiles: impl IntoIterator<Item = AccessProfile>,
    ) -> Result<Self, InitError> {
        let backend: Arc<dyn Durable> = match &config.data_dir {
            Some(dir) => Arc::new(JsonFileBackend::open(dir)?),
            None => Arc::new(MemoryBackend::new()),
        };
        let store = RecordStore::open(backend.clone());
        let audit = AuditLog::open(backend);
        let directory = AccessDirectory::new(profiles)?;
        info!(
            profiles = directory.len(),
            durable = config.data_dir.is_some(),
            "siteline initialized"
        );
        Ok(Self {
            store: Mutex::new(store),
            audit: Mutex::new(audit),
            directory,
            policy: config.bonus,
        })
    }

    /// Final best-effort flush, then drop the instance.
    ///
    /// Mutations already persisted on their own; this re-persists every
    /// collection once more so a host that swallowed earlier write
    /// failures gets a last chance at durability.
    pub fn shutdown(self) {
        let mut store = self.store.lock();
        store.flush();
        if let Some(err) = store.last_write_error() {
            warn!(error = %err, "shutdown flush left unpersisted state");
        }
    }

    /// Resolve a principal and open a session.
    ///
    /// A successful sign-in logs `login`; an unknown identity logs
    /// `access_denied` (deny-by-default) and returns an error.
    pub fn sign_in(&self, email: &str) -> Result<Session<'_>, AccessError> {
        match self.directory.resolve(email) {
            Some(profile) => {
                let profile = profile.clone();
                self.audit.lock().log(AuditDraft::new(
                    Actor::new(
                        profile.user_id.clone(),
                        profile.email.clone(),
                        profile.name.clone(),
                    ),
                    AuditAction::Login,
                    ResourceKind::Session,
                ));
                Ok(Session::new(self, profile))
            }
            None => {
                warn!(email, "sign-in attempt by unknown identity");
                self.audit.lock().log(
                    AuditDraft::new(
                        Actor::new(email, email, "unknown"),
                        AuditAction::AccessDenied,
                        ResourceKind::Session,
                    )
                    .with_details(AuditDetails::AccessDenied {
                        attempted: "login".to_string(),
                    }),
                );
                Err(AccessError::UnknownIdentity(email.to_string()))
            }
        }
    }

    /// The bonus policy this instance computes payments with.
    pub fn bonus_policy(&self) -> &BonusPolicy {
        &self.policy
    }
}
