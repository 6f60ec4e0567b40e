use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::books::dto::{BookDto, BookForCreationDto};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) author_id: Uuid,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: Option<String>,
}

impl AddBookCommandRequest {
    pub fn new(author_id: Uuid, title: &str, description: Option<&str>) -> Self {
        Self {
            author_id,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }

    pub fn build_book(&self) -> BookForCreationDto {
        BookForCreationDto::new(self.author_id, self.title.as_str(), self.description.as_deref())
    }
}


#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(&req.build_book())
            .await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
