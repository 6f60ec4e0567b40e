pub mod service;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use crate::books::dto::{BookDto, BookForCreationDto};
use crate::core::library::LibraryResult;
use crate::covers::domain::model::CoverFetchOutcome;

// BookWithCovers is a catalog record together with the outcome of every cover
// requested for it, in request order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BookWithCovers {
    pub book: BookDto,
    // None when the page calculation failed
    pub page_count: Option<i64>,
    pub covers: Vec<CoverFetchOutcome>,
}

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookForCreationDto) -> LibraryResult<BookDto>;
    async fn find_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn find_book_with_covers(&self, id: &Uuid, cancel: &CancellationToken) -> LibraryResult<BookWithCovers>;
}
