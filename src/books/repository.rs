pub mod memory_book_repository;

use async_trait::async_trait;
use uuid::Uuid;
use crate::books::domain::model::{AuthorEntity, BookEntity};
use crate::core::library::LibraryResult;
use crate::core::repository::Repository;


#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    async fn find_author(&self, author_id: &Uuid) -> LibraryResult<AuthorEntity>;
}
