//! Deterministic provider for tests and local runs without an API key

use crate::{AnalysisError, CompletionProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct MockProvider {
    outcome: Result<String, AnalysisError>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Always answer with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            outcome: Ok(response.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always fail with `error`
    pub fn failing(error: AnalysisError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `complete` calls so far, shared across clones
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
