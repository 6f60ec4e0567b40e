pub mod model;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use crate::core::domain::CoverFetchStrategy;
use crate::covers::domain::model::{Cover, CoverFetchFailure, CoverFetchOutcome, CoverName};

/// Fetches a single cover from the slow external provider.
///
/// Implementations must observe `cancel` and return [`CoverFetchFailure::Cancelled`]
/// promptly once it fires, including when it fired before the call.
#[async_trait]
pub(crate) trait CoverProvider: Sync + Send {
    async fn fetch(&self, name: &str, cancel: &CancellationToken) -> Result<Cover, CoverFetchFailure>;
}

/// Fetches a batch of covers and returns one outcome per name, in input order.
#[async_trait]
pub(crate) trait CoverFetcher: Sync + Send {
    fn strategy(&self) -> CoverFetchStrategy;
    async fn fetch_all(&self, names: &[CoverName], cancel: &CancellationToken) -> Vec<CoverFetchOutcome>;
}
