use std::sync::Arc;
use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::covers::factory::{create_cover_fetcher, create_cover_provider};
use crate::pages::PageCalculator;

pub(crate) fn create_catalog_service(config: &Configuration) -> LibraryResult<Arc<dyn CatalogService>> {
    let book_repo = factory::create_book_repository();
    let provider = create_cover_provider(config)?;
    let fetcher = create_cover_fetcher(config.cover_strategy, provider);
    let calculator = Arc::new(PageCalculator::new(config.page_calculation_delay()));
    Ok(Arc::new(CatalogServiceImpl::new(config, book_repo, fetcher, calculator)))
}

// fast delays so that tests finish quickly
#[cfg(test)]
pub(crate) fn test_config() -> Configuration {
    let mut config = Configuration::new("test");
    config.cover_min_delay_ms = 5;
    config.cover_max_delay_ms = 20;
    config.page_calculation_delay_ms = 0;
    config.stream_delay_ms = 10;
    config
}
