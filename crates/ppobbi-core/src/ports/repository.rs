use async_trait::async_trait;

use crate::domain::{NewUser, User};
use crate::error::RepoError;

/// Generic repository trait for entities that already exist in the store.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist changes to an existing entity.
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Find a user by their identity-provider subject.
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user; fails with `RepoError::Constraint` if the subject is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}
