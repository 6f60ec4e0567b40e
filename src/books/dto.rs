use chrono::{DateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;

// BookDto is a data transfer object for Books service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub book_id: Uuid,
    pub author_id: Uuid,
    pub author: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for BookDto {
    fn id(&self) -> Uuid {
        self.book_id
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id,
            author_id: other.author_id,
            author: other.author.to_string(),
            title: other.title.to_string(),
            description: other.description.clone(),
            created_at: other.created_at,
        }
    }
}

// BookForCreationDto carries the editable fields of a new book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookForCreationDto {
    pub author_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl BookForCreationDto {
    pub fn new(author_id: Uuid, title: &str, description: Option<&str>) -> Self {
        Self {
            author_id,
            title: title.to_string(),
            description: description.map(str::to_string),
        }
    }
}
