use async_trait::async_trait;
use uuid::Uuid;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &Uuid) -> LibraryResult<Entity>;

    // returns all entities
    async fn find_all(&self) -> LibraryResult<Vec<Entity>>;
}
