use chrono::{DateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;

// AuthorEntity abstracts the writer of one or more books in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct AuthorEntity {
    pub author_id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl AuthorEntity {
    pub fn new(author_id: Uuid, first_name: &str, last_name: &str) -> Self {
        Self {
            author_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Identifiable for AuthorEntity {
    fn id(&self) -> Uuid {
        self.author_id
    }
}

// BookEntity abstracts a catalog record; covers are not part of it and are
// fetched separately for each request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookEntity {
    pub book_id: Uuid,
    pub author_id: Uuid,
    pub author: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl BookEntity {
    pub fn new(author: &AuthorEntity, title: &str, description: Option<&str>) -> Self {
        Self::with_id(Uuid::new_v4(), author, title, description)
    }

    pub fn with_id(book_id: Uuid, author: &AuthorEntity, title: &str, description: Option<&str>) -> Self {
        Self {
            book_id,
            author_id: author.author_id,
            author: author.full_name(),
            title: title.to_string(),
            description: description.map(str::to_string),
            created_at: Utc::now(),
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> Uuid {
        self.book_id
    }
}
