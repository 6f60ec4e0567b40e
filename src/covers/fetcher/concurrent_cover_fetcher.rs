use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::domain::CoverFetchStrategy;
use crate::covers::domain::{CoverFetcher, CoverProvider};
use crate::covers::domain::model::{CoverFetchFailure, CoverFetchOutcome, CoverName};
use crate::covers::fetcher::fetch_one;

// ConcurrentCoverFetcher spawns one task per cover and waits for all of them,
// so the overall latency is bounded by the slowest fetch.
pub(crate) struct ConcurrentCoverFetcher {
    provider: Arc<dyn CoverProvider>,
}

impl ConcurrentCoverFetcher {
    pub(crate) fn new(provider: Arc<dyn CoverProvider>) -> Self {
        Self {
            provider,
        }
    }
}

#[async_trait]
impl CoverFetcher for ConcurrentCoverFetcher {
    fn strategy(&self) -> CoverFetchStrategy {
        CoverFetchStrategy::Concurrent
    }

    async fn fetch_all(&self, names: &[CoverName], cancel: &CancellationToken) -> Vec<CoverFetchOutcome> {
        let started = Instant::now();
        // slot i belongs to names[i]; tasks are launched even when the token
        // already fired and settle as cancelled on their first poll
        let slots: Vec<JoinHandle<CoverFetchOutcome>> = names.iter().map(|name| {
            let provider = Arc::clone(&self.provider);
            let cancel = cancel.clone();
            let name = name.clone();
            tokio::spawn(async move {
                tracing::debug!(cover = name.as_str(), thread = ?std::thread::current().id(), "fetching cover");
                fetch_one(provider.as_ref(), name.as_str(), &cancel).await
            })
        }).collect();

        let settled = join_all(slots).await;

        let outcomes: Vec<CoverFetchOutcome> = names.iter().zip(settled).map(|(name, res)| match res {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(cover = name.as_str(), error = %err, "cover task failed");
                CoverFetchOutcome::failure(name, CoverFetchFailure::provider(
                    format!("cover task failed {}", err).as_str()))
            }
        }).collect();
        tracing::info!(strategy = "concurrent", covers = names.len(),
            elapsed_ms = started.elapsed().as_millis() as u64, "fetched covers");
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;
    use crate::covers::domain::CoverFetcher;
    use crate::covers::domain::model::{CoverFetchFailure, CoverFetchOutcome};
    use crate::covers::fetcher::concurrent_cover_fetcher::ConcurrentCoverFetcher;
    use crate::covers::fetcher::sequential_cover_fetcher::SequentialCoverFetcher;
    use crate::covers::fetcher::test_support::{cancel_after, names, Scripted, ScriptedCoverProvider};

    #[tokio::test]
    async fn test_should_keep_input_order_when_completing_out_of_order() {
        let provider = Arc::new(ScriptedCoverProvider::new(&[
            ("a", 300, Scripted::Succeed),
            ("b", 200, Scripted::Succeed),
            ("c", 100, Scripted::Succeed),
        ]));
        let sut = ConcurrentCoverFetcher::new(provider.clone());

        let started = Instant::now();
        let outcomes = sut.fetch_all(&names(&["a", "b", "c"]), &CancellationToken::new()).await;
        // bounded by the slowest fetch rather than the 600ms sum
        assert!(started.elapsed() < Duration::from_millis(550));
        assert_eq!(vec!["a", "b", "c"], outcomes.iter().map(CoverFetchOutcome::name).collect::<Vec<_>>());
        assert!(outcomes.iter().all(CoverFetchOutcome::is_success));
        assert_eq!(3, provider.calls());
    }

    #[tokio::test]
    async fn test_should_record_provider_error_without_cancelling_siblings() {
        let provider = Arc::new(ScriptedCoverProvider::new(&[
            ("front", 100, Scripted::Succeed),
            ("back", 100, Scripted::Succeed),
            ("dummycover", 5, Scripted::Fail(CoverFetchFailure::provider("backend down"))),
        ]));
        let sut = ConcurrentCoverFetcher::new(provider);

        let outcomes = sut.fetch_all(&names(&["front", "back", "dummycover"]), &CancellationToken::new()).await;
        assert_eq!(3, outcomes.len());
        assert!(outcomes[0].is_success());
        assert!(outcomes[1].is_success());
        assert_eq!(CoverFetchOutcome::failure("dummycover", CoverFetchFailure::provider("backend down")), outcomes[2]);
    }

    #[tokio::test]
    async fn test_should_cancel_all_when_already_cancelled() {
        let provider = Arc::new(ScriptedCoverProvider::new(&[
            ("a", 10, Scripted::Succeed),
            ("b", 10, Scripted::Succeed),
            ("c", 10, Scripted::Succeed),
        ]));
        let sut = ConcurrentCoverFetcher::new(provider);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcomes = sut.fetch_all(&names(&["a", "b", "c"]), &cancel).await;
        assert_eq!(vec![
            CoverFetchOutcome::cancelled("a"),
            CoverFetchOutcome::cancelled("b"),
            CoverFetchOutcome::cancelled("c"),
        ], outcomes);
    }

    #[tokio::test]
    async fn test_should_keep_settled_outcomes_on_cancel() {
        let provider = Arc::new(ScriptedCoverProvider::new(&[
            ("a", 10, Scripted::Succeed),
            ("b", 3000, Scripted::Succeed),
            ("c", 20, Scripted::Fail(CoverFetchFailure::NotFound)),
            ("d", 3000, Scripted::Succeed),
        ]));
        let sut = ConcurrentCoverFetcher::new(provider);
        let cancel = CancellationToken::new();
        cancel_after(&cancel, 300);

        let started = Instant::now();
        let outcomes = sut.fetch_all(&names(&["a", "b", "c", "d"]), &cancel).await;
        assert!(started.elapsed() < Duration::from_millis(2000));
        assert!(outcomes[0].is_success());
        assert_eq!(CoverFetchOutcome::cancelled("b"), outcomes[1]);
        assert_eq!(CoverFetchOutcome::failure("c", CoverFetchFailure::NotFound), outcomes[2]);
        assert_eq!(CoverFetchOutcome::cancelled("d"), outcomes[3]);
    }

    #[tokio::test]
    async fn test_should_record_panicked_fetch_at_its_slot() {
        let provider = Arc::new(ScriptedCoverProvider::new(&[
            ("a", 10, Scripted::Succeed),
            ("b", 10, Scripted::Panic),
            ("c", 10, Scripted::Succeed),
        ]));
        let sut = ConcurrentCoverFetcher::new(provider);

        let outcomes = sut.fetch_all(&names(&["a", "b", "c"]), &CancellationToken::new()).await;
        assert!(outcomes[0].is_success());
        assert_eq!("b", outcomes[1].name());
        assert!(matches!(outcomes[1].reason(), Some(CoverFetchFailure::ProviderError { .. })));
        assert!(outcomes[2].is_success());
    }

    #[tokio::test]
    async fn test_should_match_sequential_outcomes() {
        let script = [
            ("front", 30, Scripted::Succeed),
            ("back", 10, Scripted::Fail(CoverFetchFailure::NotFound)),
            ("dummycover", 20, Scripted::Fail(CoverFetchFailure::provider("backend down"))),
            ("spine", 5, Scripted::Succeed),
        ];
        let requested = names(&["front", "back", "dummycover", "spine"]);
        let sequential = SequentialCoverFetcher::new(Arc::new(ScriptedCoverProvider::new(&script)))
            .fetch_all(&requested, &CancellationToken::new()).await;
        let concurrent = ConcurrentCoverFetcher::new(Arc::new(ScriptedCoverProvider::new(&script)))
            .fetch_all(&requested, &CancellationToken::new()).await;
        assert_eq!(sequential, concurrent);
    }
}
