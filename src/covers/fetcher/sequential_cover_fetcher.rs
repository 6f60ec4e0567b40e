use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::domain::CoverFetchStrategy;
use crate::covers::domain::{CoverFetcher, CoverProvider};
use crate::covers::domain::model::{CoverFetchOutcome, CoverName};
use crate::covers::fetcher::fetch_one;

// SequentialCoverFetcher fetches covers one by one in the requested order, so
// the overall latency is the sum of every fetch.
pub(crate) struct SequentialCoverFetcher {
    provider: Arc<dyn CoverProvider>,
}

impl SequentialCoverFetcher {
    pub(crate) fn new(provider: Arc<dyn CoverProvider>) -> Self {
        Self {
            provider,
        }
    }
}

#[async_trait]
impl CoverFetcher for SequentialCoverFetcher {
    fn strategy(&self) -> CoverFetchStrategy {
        CoverFetchStrategy::Sequential
    }

    async fn fetch_all(&self, names: &[CoverName], cancel: &CancellationToken) -> Vec<CoverFetchOutcome> {
        let started = Instant::now();
        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            // names not started yet are settled without touching the provider
            if cancel.is_cancelled() {
                outcomes.push(CoverFetchOutcome::cancelled(name));
                continue;
            }
            let outcome = fetch_one(self.provider.as_ref(), name, cancel).await;
            tracing::debug!(cover = name.as_str(), outcome = %outcome.kind(), "cover settled");
            outcomes.push(outcome);
        }
        tracing::info!(strategy = "sequential", covers = names.len(),
            elapsed_ms = started.elapsed().as_millis() as u64, "fetched covers");
        outcomes
    }
}
