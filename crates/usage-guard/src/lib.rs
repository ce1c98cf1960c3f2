//! One free analysis per email
//!
//! `UsageGuard` answers "has this email already used its free analysis?"
//! against an external record store and appends a record once an analysis
//! is allowed through. The store is a dumb table: there is no atomic
//! check-and-write, so two concurrent first requests for one email can
//! both pass.

pub mod memory;
pub mod sheetdb;

use async_trait::async_trait;
use shared_types::UsageRecord;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub use memory::MemoryStore;
pub use sheetdb::SheetDbStore;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("A valid email address is required")]
    InvalidEmail,

    #[error("Usage store returned HTTP {0}")]
    Http(u16),

    #[error("Usage store request failed: {0}")]
    Transport(String),

    #[error("Usage store returned an unexpected body: {0}")]
    Malformed(String),

    /// Read failed and the guard is configured to fail closed
    #[error("Usage guard unavailable: {0}")]
    Unavailable(String),
}

/// Append-only table of usage records keyed by email
#[async_trait]
pub trait UsageStore: Send + Sync {
    /// All records whose email column equals `email`
    async fn find(&self, email: &str) -> Result<Vec<UsageRecord>, UsageError>;

    async fn append(&self, record: UsageRecord) -> Result<(), UsageError>;
}

#[async_trait]
impl<T: UsageStore + ?Sized> UsageStore for Arc<T> {
    async fn find(&self, email: &str) -> Result<Vec<UsageRecord>, UsageError> {
        (**self).find(email).await
    }

    async fn append(&self, record: UsageRecord) -> Result<(), UsageError> {
        (**self).append(record).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardPolicy {
    /// When the store cannot be read, let the request through (`true`) or
    /// block it with `UsageError::Unavailable` (`false`)
    pub fail_open: bool,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self { fail_open: true }
    }
}

/// Trim and lowercase; `None` unless the result contains both '@' and '.'
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_ascii_lowercase();
    if email.contains('@') && email.contains('.') {
        Some(email)
    } else {
        None
    }
}

/// Domain part only, for logs
fn email_domain(email: &str) -> &str {
    email.rsplit_once('@').map(|(_, d)| d).unwrap_or("")
}

pub struct UsageGuard<S> {
    store: S,
    policy: GuardPolicy,
}

impl<S: UsageStore> UsageGuard<S> {
    pub fn new(store: S, policy: GuardPolicy) -> Self {
        Self { store, policy }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether `email` already consumed its free analysis
    pub async fn has_used(&self, email: &str) -> Result<bool, UsageError> {
        let email = normalize_email(email).ok_or(UsageError::InvalidEmail)?;

        match self.store.find(&email).await {
            Ok(records) => {
                let used = records.iter().any(|r| r.consumes_quota());
                debug!(domain = email_domain(&email), used, "usage lookup");
                Ok(used)
            }
            Err(e) if self.policy.fail_open => {
                warn!(error = %e, "usage store unreadable, allowing request");
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "usage store unreadable, blocking request");
                Err(UsageError::Unavailable(e.to_string()))
            }
        }
    }

    /// Record that `email` consumed its free analysis
    pub async fn record_use(&self, email: &str) -> Result<(), UsageError> {
        let email = normalize_email(email).ok_or(UsageError::InvalidEmail)?;
        self.store
            .append(UsageRecord::free_analysis(email))
            .await
            .inspect_err(|e| warn!(error = %e, "failed to record usage"))
    }

    /// Best-effort analytics for the sample report; failures are only logged
    pub async fn log_sample_view(&self) {
        if let Err(e) = self.store.append(UsageRecord::sample_view()).await {
            warn!(error = %e, "failed to record sample view");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use shared_types::UsageAction;

    /// Store whose reads always fail
    struct BrokenStore;

    #[async_trait]
    impl UsageStore for BrokenStore {
        async fn find(&self, _email: &str) -> Result<Vec<UsageRecord>, UsageError> {
            Err(UsageError::Http(503))
        }

        async fn append(&self, _record: UsageRecord) -> Result<(), UsageError> {
            Err(UsageError::Http(503))
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Renter@Example.COM "),
            Some("renter@example.com".to_string())
        );
        assert_eq!(normalize_email("renter@localhost"), None);
        assert_eq!(normalize_email("renter.example.com"), None);
        assert_eq!(normalize_email(""), None);
    }

    #[tokio::test]
    async fn test_record_then_has_used() {
        let guard = UsageGuard::new(MemoryStore::new(), GuardPolicy::default());
        assert!(!guard.has_used("renter@example.com").await.unwrap());

        guard.record_use("renter@example.com").await.unwrap();
        assert!(guard.has_used("renter@example.com").await.unwrap());
        assert!(guard.has_used("  RENTER@example.com").await.unwrap());
        assert!(!guard.has_used("other@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_sample_views_do_not_consume_quota() {
        let guard = UsageGuard::new(MemoryStore::new(), GuardPolicy::default());
        guard.log_sample_view().await;
        guard.log_sample_view().await;

        let records = guard.store().records().await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.action == Some(UsageAction::SampleView)));

        guard
            .store()
            .append(UsageRecord {
                email: "renter@example.com".to_string(),
                action: Some(UsageAction::SampleView),
                timestamp: None,
            })
            .await
            .unwrap();
        assert!(!guard.has_used("renter@example.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_before_store() {
        let guard = UsageGuard::new(BrokenStore, GuardPolicy { fail_open: false });
        assert_eq!(guard.has_used("nobody").await, Err(UsageError::InvalidEmail));
        assert_eq!(guard.record_use("nobody").await, Err(UsageError::InvalidEmail));
    }

    #[tokio::test]
    async fn test_fail_open_allows_on_read_failure() {
        let guard = UsageGuard::new(BrokenStore, GuardPolicy { fail_open: true });
        assert_eq!(guard.has_used("renter@example.com").await, Ok(false));
    }

    #[tokio::test]
    async fn test_fail_closed_blocks_on_read_failure() {
        let guard = UsageGuard::new(BrokenStore, GuardPolicy { fail_open: false });
        assert!(matches!(
            guard.has_used("renter@example.com").await,
            Err(UsageError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_and_sample_view_swallows() {
        let guard = UsageGuard::new(BrokenStore, GuardPolicy::default());
        assert_eq!(
            guard.record_use("renter@example.com").await,
            Err(UsageError::Http(503))
        );
        guard.log_sample_view().await;
    }

    proptest! {
        #[test]
        fn normalized_email_is_stable(local in "[A-Za-z0-9]{1,10}", domain in "[A-Za-z]{1,10}\\.[a-z]{2,3}") {
            let raw = format!("  {}@{} ", local, domain);
            let once = normalize_email(&raw).unwrap();
            prop_assert_eq!(normalize_email(&once), Some(once.clone()));
            prop_assert_eq!(once.trim(), once.as_str());
            prop_assert_eq!(once.to_ascii_lowercase(), once.clone());
        }
    }
}
