use std::sync::Arc;
use std::time::Duration;
use crate::core::domain::{Configuration, CoverFetchStrategy, CoverProviderKind};
use crate::core::library::LibraryResult;
use crate::covers::domain::{CoverFetcher, CoverProvider};
use crate::covers::fetcher::concurrent_cover_fetcher::ConcurrentCoverFetcher;
use crate::covers::fetcher::sequential_cover_fetcher::SequentialCoverFetcher;
use crate::covers::provider::http_cover_provider::HttpCoverProvider;
use crate::covers::provider::simulated_cover_provider::SimulatedCoverProvider;

pub(crate) fn create_simulated_provider(config: &Configuration) -> Arc<dyn CoverProvider> {
    Arc::new(SimulatedCoverProvider::new(
        Duration::from_millis(config.cover_min_delay_ms),
        Duration::from_millis(config.cover_max_delay_ms),
        config.faulty_covers.clone(),
        config.missing_covers.clone()))
}

pub(crate) fn create_cover_provider(config: &Configuration) -> LibraryResult<Arc<dyn CoverProvider>> {
    match &config.cover_provider {
        CoverProviderKind::Simulated => {
            Ok(create_simulated_provider(config))
        }
        CoverProviderKind::Http { base_url } => {
            Ok(Arc::new(HttpCoverProvider::new(base_url)?))
        }
    }
}

pub(crate) fn create_cover_fetcher(strategy: CoverFetchStrategy, provider: Arc<dyn CoverProvider>) -> Box<dyn CoverFetcher> {
    match strategy {
        CoverFetchStrategy::Sequential => {
            Box::new(SequentialCoverFetcher::new(provider))
        }
        CoverFetchStrategy::Concurrent => {
            Box::new(ConcurrentCoverFetcher::new(provider))
        }
    }
}
