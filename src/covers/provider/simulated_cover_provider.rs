use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::covers::domain::CoverProvider;
use crate::covers::domain::model::{Cover, CoverFetchFailure};
use crate::covers::provider::matches_variant;

const MIN_COVER_SIZE: usize = 2 * 1024;
const MAX_COVER_SIZE: usize = 10 * 1024;

// SimulatedCoverProvider sleeps for a jittered delay and returns random bytes,
// standing in for the remote book covers API.
#[derive(Debug, Clone)]
pub struct SimulatedCoverProvider {
    min_delay: Duration,
    max_delay: Duration,
    faulty_covers: Vec<String>,
    missing_covers: Vec<String>,
}

impl SimulatedCoverProvider {
    pub(crate) fn new(min_delay: Duration, max_delay: Duration,
                      faulty_covers: Vec<String>, missing_covers: Vec<String>) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
            faulty_covers,
            missing_covers,
        }
    }

    fn jitter(&self) -> Duration {
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    fn random_bytes() -> Vec<u8> {
        let mut rng = rand::thread_rng();
        let mut bytes = vec![0u8; rng.gen_range(MIN_COVER_SIZE..=MAX_COVER_SIZE)];
        rng.fill(&mut bytes[..]);
        bytes
    }
}

#[async_trait]
impl CoverProvider for SimulatedCoverProvider {
    async fn fetch(&self, name: &str, cancel: &CancellationToken) -> Result<Cover, CoverFetchFailure> {
        if cancel.is_cancelled() {
            return Err(CoverFetchFailure::Cancelled);
        }
        let delay = self.jitter();
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(cover = name, "simulated cover fetch cancelled");
                return Err(CoverFetchFailure::Cancelled);
            }
            _ = tokio::time::sleep(delay) => {}
        }
        if matches_variant(name, &self.missing_covers) {
            return Err(CoverFetchFailure::NotFound);
        }
        if matches_variant(name, &self.faulty_covers) {
            return Err(CoverFetchFailure::provider(format!("simulated fault for {}", name).as_str()));
        }
        Ok(Cover::new(name, Self::random_bytes()))
    }
}
