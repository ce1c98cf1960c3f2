//! In-process store for tests and development without a store URL

use crate::{UsageError, UsageStore};
use async_trait::async_trait;
use shared_types::UsageRecord;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<UsageRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far
    pub async fn records(&self) -> Vec<UsageRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl UsageStore for MemoryStore {
    async fn find(&self, email: &str) -> Result<Vec<UsageRecord>, UsageError> {
        let records = self.records.lock().await;
        Ok(records.iter().filter(|r| r.email == email).cloned().collect())
    }

    async fn append(&self, record: UsageRecord) -> Result<(), UsageError> {
        self.records.lock().await.push(record);
        Ok(())
    }
}
