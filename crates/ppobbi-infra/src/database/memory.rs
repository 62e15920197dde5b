//! In-memory user store - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ppobbi_core::domain::{NewUser, User};
use ppobbi_core::error::RepoError;
use ppobbi_core::ports::{BaseRepository, UserRepository};

#[derive(Default)]
struct Store {
    next_id: i64,
    users: HashMap<i64, User>,
    by_subject: HashMap<String, i64>,
}

/// In-memory user repository with sequential ids starting at 1.
///
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        let old_subject = store
            .users
            .get(&user.id)
            .map(|current| current.subject.clone())
            .ok_or(RepoError::NotFound)?;

        if old_subject != user.subject {
            if store.by_subject.contains_key(&user.subject) {
                return Err(RepoError::Constraint(format!(
                    "subject {} already registered",
                    user.subject
                )));
            }
            store.by_subject.remove(&old_subject);
            store.by_subject.insert(user.subject.clone(), user.id);
        }

        store.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .by_subject
            .get(subject)
            .and_then(|id| store.users.get(id))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.by_subject.contains_key(&user.subject) {
            return Err(RepoError::Constraint(format!(
                "subject {} already registered",
                user.subject
            )));
        }

        store.next_id += 1;
        let user = user.with_id(store.next_id);
        store.by_subject.insert(user.subject.clone(), user.id);
        store.users.insert(user.id, user.clone());

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_sequential_from_one() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(NewUser::new("kakao-1", "alice")).await.unwrap();
        let second = repo.create(NewUser::new("kakao-2", "bob")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_subject_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(NewUser::new("kakao-1", "alice")).await.unwrap();

        let result = repo.create(NewUser::new("kakao-1", "mallory")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_find_by_subject_and_id() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(NewUser::new("kakao-1", "alice")).await.unwrap();

        assert_eq!(repo.find_by_subject("kakao-1").await.unwrap(), Some(created.clone()));
        assert_eq!(repo.find_by_id(created.id).await.unwrap(), Some(created));
        assert_eq!(repo.find_by_subject("kakao-2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_updates_existing_user() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo.create(NewUser::new("kakao-1", "alice")).await.unwrap();

        user.rename("alicia");
        repo.save(user.clone()).await.unwrap();

        let stored = repo.find_by_subject("kakao-1").await.unwrap().unwrap();
        assert_eq!(stored.name, "alicia");
    }

    #[tokio::test]
    async fn test_save_unknown_user_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let ghost = NewUser::new("kakao-1", "ghost").with_id(99);

        assert!(matches!(repo.save(ghost).await, Err(RepoError::NotFound)));
    }
}
