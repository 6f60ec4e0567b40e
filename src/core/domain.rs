use std::fmt;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::library::{LibraryError, LibraryResult};

// Identifiable defines common traits that can be shared by stored objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> Uuid;
}

// CoverFetchStrategy selects how the covers of a book are retrieved
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum CoverFetchStrategy {
    Sequential,
    Concurrent,
}

impl From<String> for CoverFetchStrategy {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "sequential" => CoverFetchStrategy::Sequential,
            "concurrent" => CoverFetchStrategy::Concurrent,
            _ => CoverFetchStrategy::Concurrent,
        }
    }
}

impl Display for CoverFetchStrategy {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CoverFetchStrategy::Sequential => write!(f, "Sequential"),
            CoverFetchStrategy::Concurrent => write!(f, "Concurrent"),
        }
    }
}

// CoverProviderKind tells where covers come from
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) enum CoverProviderKind {
    Simulated,
    Http { base_url: String },
}

// Configuration abstracts config options for the books service
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    pub cover_strategy: CoverFetchStrategy,
    pub cover_variants: Vec<String>,
    // None disables the per-request deadline
    pub cover_timeout_ms: Option<u64>,
    pub cover_provider: CoverProviderKind,
    pub cover_min_delay_ms: u64,
    pub cover_max_delay_ms: u64,
    pub faulty_covers: Vec<String>,
    pub missing_covers: Vec<String>,
    pub page_calculation_delay_ms: u64,
    // pause before each book of the streamed list
    pub stream_delay_ms: u64,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            cover_strategy: CoverFetchStrategy::Concurrent,
            cover_variants: vec!["front".to_string(), "back".to_string(), "dummycover".to_string()],
            cover_timeout_ms: Some(5000),
            cover_provider: CoverProviderKind::Simulated,
            cover_min_delay_ms: 500,
            cover_max_delay_ms: 2000,
            faulty_covers: vec![],
            missing_covers: vec![],
            page_calculation_delay_ms: 200,
            stream_delay_ms: 2000,
        }
    }

    pub fn from_env(branch_id: &str) -> LibraryResult<Self> {
        Self::from_lookup(branch_id, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(branch_id: &str, lookup: F) -> LibraryResult<Self>
        where F: Fn(&str) -> Option<String> {
        let mut config = Configuration::new(branch_id);
        if let Some(strategy) = lookup("BOOKS_COVER_STRATEGY") {
            config.cover_strategy = CoverFetchStrategy::from(strategy);
        }
        if let Some(variants) = lookup("BOOKS_COVER_VARIANTS") {
            config.cover_variants = split_list(&variants);
        }
        if let Some(timeout) = lookup("BOOKS_COVER_TIMEOUT_MS") {
            let timeout = parse_millis("BOOKS_COVER_TIMEOUT_MS", &timeout)?;
            config.cover_timeout_ms = if timeout == 0 { None } else { Some(timeout) };
        }
        if let Some(base_url) = lookup("BOOKS_COVER_PROVIDER_URL") {
            config.cover_provider = CoverProviderKind::Http { base_url };
        }
        if let Some(delay) = lookup("BOOKS_COVER_MIN_DELAY_MS") {
            config.cover_min_delay_ms = parse_millis("BOOKS_COVER_MIN_DELAY_MS", &delay)?;
        }
        if let Some(delay) = lookup("BOOKS_COVER_MAX_DELAY_MS") {
            config.cover_max_delay_ms = parse_millis("BOOKS_COVER_MAX_DELAY_MS", &delay)?;
        }
        if let Some(names) = lookup("BOOKS_FAULTY_COVERS") {
            config.faulty_covers = split_list(&names);
        }
        if let Some(names) = lookup("BOOKS_MISSING_COVERS") {
            config.missing_covers = split_list(&names);
        }
        if let Some(delay) = lookup("BOOKS_PAGE_DELAY_MS") {
            config.page_calculation_delay_ms = parse_millis("BOOKS_PAGE_DELAY_MS", &delay)?;
        }
        if let Some(delay) = lookup("BOOKS_STREAM_DELAY_MS") {
            config.stream_delay_ms = parse_millis("BOOKS_STREAM_DELAY_MS", &delay)?;
        }
        if config.cover_min_delay_ms > config.cover_max_delay_ms {
            return Err(LibraryError::validation(
                format!("cover delay range {}..{} is empty",
                        config.cover_min_delay_ms, config.cover_max_delay_ms).as_str(), None));
        }
        Ok(config)
    }

    pub fn cover_timeout(&self) -> Option<Duration> {
        self.cover_timeout_ms.map(Duration::from_millis)
    }

    pub fn page_calculation_delay(&self) -> Duration {
        Duration::from_millis(self.page_calculation_delay_ms)
    }

    pub fn stream_delay(&self) -> Duration {
        Duration::from_millis(self.stream_delay_ms)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_millis(key: &str, value: &str) -> LibraryResult<u64> {
    value.trim().parse::<u64>().map_err(|err| LibraryError::validation(
        format!("invalid {} value {:?}: {}", key, value, err).as_str(), Some(key.to_string())))
}
