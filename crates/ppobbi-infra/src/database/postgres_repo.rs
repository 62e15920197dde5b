//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};

use ppobbi_core::domain::{NewUser, User};
use ppobbi_core::error::RepoError;
use ppobbi_core::ports::UserRepository;

use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, write_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(subject_len = subject.len(), "Finding user by subject");

        let result = UserEntity::find()
            .filter(user::Column::Subject.eq(subject))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = new_user.into();
        let model = active_model.insert(&self.db).await.map_err(write_error)?;

        tracing::debug!(user_id = model.id, "Inserted user");
        Ok(model.into())
    }
}
