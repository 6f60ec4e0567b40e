use std::sync::Arc;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, BookForCreationDto};
use crate::books::repository::BookRepository;
use crate::catalog::domain::{BookWithCovers, CatalogService};
use crate::core::domain::{Configuration, Identifiable};
use crate::core::library::{LibraryError, LibraryResult};
use crate::covers::domain::CoverFetcher;
use crate::covers::domain::model::CoverName;
use crate::pages::{compute_page_count, PageCalculator};
use crate::utils::cancel::deadline_token;

const MAX_TITLE_LEN: usize = 150;
const MAX_DESCRIPTION_LEN: usize = 2500;

pub(crate) struct CatalogServiceImpl {
    book_repository: Box<dyn BookRepository>,
    cover_fetcher: Box<dyn CoverFetcher>,
    page_calculator: Arc<PageCalculator>,
    cover_variants: Vec<String>,
    cover_timeout: Option<Duration>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      cover_fetcher: Box<dyn CoverFetcher>, page_calculator: Arc<PageCalculator>) -> Self {
        Self {
            book_repository,
            cover_fetcher,
            page_calculator,
            cover_variants: config.cover_variants.clone(),
            cover_timeout: config.cover_timeout(),
        }
    }

    fn validate(book: &BookForCreationDto) -> LibraryResult<()> {
        let title = book.title.trim();
        if title.is_empty() {
            return Err(LibraryError::validation("title is required", Some("title".to_string())));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(LibraryError::validation(
                format!("title is longer than {} characters", MAX_TITLE_LEN).as_str(), Some("title".to_string())));
        }
        if let Some(description) = &book.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(LibraryError::validation(
                    format!("description is longer than {} characters", MAX_DESCRIPTION_LEN).as_str(),
                    Some("description".to_string())));
            }
        }
        Ok(())
    }
}

// cover names are derived from the book id so that every book has its own covers
pub(crate) fn cover_names<B: Identifiable>(book: &B, variants: &[String]) -> Vec<CoverName> {
    variants.iter().map(|variant| format!("{}-{}", book.id(), variant)).collect()
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookForCreationDto) -> LibraryResult<BookDto> {
        Self::validate(book)?;
        let author = match self.book_repository.find_author(&book.author_id).await {
            Ok(author) => author,
            Err(err) if err.is_not_found() => {
                return Err(LibraryError::validation(
                    format!("unknown author {}", book.author_id).as_str(), Some("author_id".to_string())));
            }
            Err(err) => return Err(err),
        };
        let entity = BookEntity::new(&author, book.title.trim(), book.description.as_deref());
        let _ = self.book_repository.create(&entity).await?;
        tracing::info!(book_id = %entity.book_id, title = entity.title.as_str(), "added book");
        Ok(BookDto::from(&entity))
    }

    async fn find_books(&self) -> LibraryResult<Vec<BookDto>> {
        let books = self.book_repository.find_all().await?;
        tracing::info!(books = books.len(), "returning all books");
        Ok(books.iter().map(BookDto::from).collect())
    }

    async fn find_book_with_covers(&self, id: &Uuid, cancel: &CancellationToken) -> LibraryResult<BookWithCovers> {
        tracing::debug!(book_id = %id, thread = ?std::thread::current().id(), "loading book");
        let book = match self.book_repository.get(id).await {
            Ok(book) => book,
            Err(err) => {
                if err.is_not_found() {
                    tracing::info!(book_id = %id, "book not found");
                }
                return Err(err);
            }
        };

        let names = cover_names(&book, &self.cover_variants);
        let deadline = deadline_token(cancel, self.cover_timeout);
        // cancels on every exit, a dropped future included; no cover task or
        // deadline timer outlives the call
        let _deadline_guard = deadline.clone().drop_guard();
        let started = Instant::now();
        let (covers, page_count) = tokio::join!(
            self.cover_fetcher.fetch_all(&names, &deadline),
            compute_page_count(Arc::clone(&self.page_calculator), book.book_id),
        );

        let page_count = match page_count {
            Ok(pages) => Some(pages),
            Err(err) => {
                tracing::warn!(book_id = %id, error = %err, "page calculation failed");
                None
            }
        };
        let fetched = covers.iter().filter(|c| c.is_success()).count();
        tracing::info!(book_id = %id, strategy = %self.cover_fetcher.strategy(),
            requested = names.len(), fetched, cancelled = cancel.is_cancelled(),
            elapsed_ms = started.elapsed().as_millis() as u64, "assembled book with covers");

        Ok(BookWithCovers {
            book: BookDto::from(&book),
            page_count,
            covers,
        })
    }
}
