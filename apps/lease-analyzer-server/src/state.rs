//! Shared application state

use analysis_client::CompletionProvider;
use std::sync::Arc;
use usage_guard::{GuardPolicy, UsageGuard, UsageStore};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
    pub guard: Arc<UsageGuard<Arc<dyn UsageStore>>>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        store: Arc<dyn UsageStore>,
        policy: GuardPolicy,
    ) -> Self {
        Self {
            provider,
            guard: Arc::new(UsageGuard::new(store, policy)),
        }
    }
}
