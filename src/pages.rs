use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use crate::core::library::{LibraryError, LibraryResult};

const MIN_PAGES: i64 = 100;
const PAGE_SPREAD: u64 = 900;

// PageCalculator wraps the legacy page count routine. It is synchronous and
// blocks the calling thread for the whole computation.
#[derive(Debug, Clone)]
pub(crate) struct PageCalculator {
    delay: Duration,
}

impl PageCalculator {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
        }
    }

    pub fn calculate_book_pages(&self, id: &Uuid) -> LibraryResult<i64> {
        if id.is_nil() {
            return Err(LibraryError::validation("cannot calculate pages of a nil book id", None));
        }
        std::thread::sleep(self.delay);
        let digest = id.as_bytes().iter()
            .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(*b as u64));
        Ok(MIN_PAGES + (digest % PAGE_SPREAD) as i64)
    }
}

/// Runs the page calculation on the blocking pool.
pub(crate) async fn compute_page_count(calculator: Arc<PageCalculator>, id: Uuid) -> LibraryResult<i64> {
    tokio::task::spawn_blocking(move || {
        tracing::debug!(book_id = %id, thread = ?std::thread::current().id(), "calculating pages");
        calculator.calculate_book_pages(&id)
    }).await.map_err(LibraryError::from)?
}
