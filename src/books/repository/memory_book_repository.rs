use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::books::domain::model::{AuthorEntity, BookEntity};
use crate::books::repository::BookRepository;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// MemoryBookRepository keeps the catalog in process, it is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryBookRepository {
    authors: RwLock<HashMap<Uuid, AuthorEntity>>,
    books: RwLock<HashMap<Uuid, BookEntity>>,
}

impl MemoryBookRepository {
    pub(crate) fn new(authors: Vec<AuthorEntity>, books: Vec<BookEntity>) -> Self {
        Self {
            authors: RwLock::new(authors.into_iter().map(|a| (a.id(), a)).collect()),
            books: RwLock::new(books.into_iter().map(|b| (b.id(), b)).collect()),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for MemoryBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let mut books = self.books.write().await;
        if books.contains_key(&entity.book_id) {
            return Err(LibraryError::duplicate_key(format!("book {} already exists", entity.book_id).as_str()));
        }
        books.insert(entity.book_id, entity.clone());
        Ok(1)
    }

    async fn get(&self, id: &Uuid) -> LibraryResult<BookEntity> {
        self.books.read().await.get(id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn find_all(&self) -> LibraryResult<Vec<BookEntity>> {
        let mut books: Vec<BookEntity> = self.books.read().await.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn find_author(&self, author_id: &Uuid) -> LibraryResult<AuthorEntity> {
        self.authors.read().await.get(author_id).cloned()
            .ok_or_else(|| LibraryError::not_found(format!("author not found for {}", author_id).as_str()))
    }
}
