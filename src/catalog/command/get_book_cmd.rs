use std::sync::Arc;
use async_trait::async_trait;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use crate::catalog::domain::CatalogService;
use crate::catalog::dto::BookWithCoversDto;
use crate::core::command::{Command, CommandError};
use crate::core::library::LibraryError;

pub(crate) struct GetBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl GetBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GetBookCommandRequest {
    pub(crate) book_id: String,
    // fires when the caller goes away
    pub(crate) cancel: CancellationToken,
}

impl GetBookCommandRequest {
    pub fn new(book_id: String, cancel: CancellationToken) -> Self {
        Self {
            book_id,
            cancel,
        }
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct GetBookCommandResponse {
    #[serde(flatten)]
    pub(crate) book: BookWithCoversDto,
}

impl GetBookCommandResponse {
    pub fn new(book: BookWithCoversDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        // malformed ids are rejected before any cover is fetched
        let book_id = Uuid::parse_str(req.book_id.as_str()).map_err(LibraryError::from)?;
        self.catalog_service.find_book_with_covers(&book_id, &req.cancel)
            .await.map_err(CommandError::from)
            .map(|res| GetBookCommandResponse::new(BookWithCoversDto::from(&res)))
    }
}
