pub mod concurrent_cover_fetcher;
pub mod sequential_cover_fetcher;

use tokio_util::sync::CancellationToken;
use crate::covers::domain::CoverProvider;
use crate::covers::domain::model::CoverFetchOutcome;

// Fetches one cover and settles it as an outcome. The select makes a fired
// token win over a provider that is slow to notice it.
pub(crate) async fn fetch_one(provider: &dyn CoverProvider, name: &str,
                              cancel: &CancellationToken) -> CoverFetchOutcome {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => CoverFetchOutcome::cancelled(name),
        res = provider.fetch(name, cancel) => CoverFetchOutcome::from_result(name, res),
    }
}
