//! Spreadsheet-backed store reached over the SheetDB REST API
//!
//! Reads: `GET {base}/search?Email=...` returning a JSON array of rows.
//! Writes: `POST {base}` with `{"data": [row]}`.

use crate::{UsageError, UsageStore};
use async_trait::async_trait;
use serde::Serialize;
use shared_types::UsageRecord;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct SheetDbStore {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct AppendBody<'a> {
    data: [&'a UsageRecord; 1],
}

impl SheetDbStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, UsageError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| UsageError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl UsageStore for SheetDbStore {
    async fn find(&self, email: &str) -> Result<Vec<UsageRecord>, UsageError> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("Email", email)])
            .send()
            .await
            .map_err(|e| UsageError::Transport(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(UsageError::Http(status.as_u16()));
        }

        let rows: Vec<UsageRecord> = response
            .json()
            .await
            .map_err(|e| UsageError::Malformed(e.to_string()))?;
        debug!(rows = rows.len(), "usage store search");
        Ok(rows)
    }

    async fn append(&self, record: UsageRecord) -> Result<(), UsageError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(&AppendBody { data: [&record] })
            .send()
            .await
            .map_err(|e| UsageError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UsageError::Http(response.status().as_u16()));
        }
        Ok(())
    }
}
