//! Account service - sign-up-or-in and user lookup over an identity
//! provider and a user repository.

use std::sync::Arc;

use async_trait::async_trait;

use ppobbi_shared::dto::{SignUpOrInRequest, UserInfo};

use crate::domain::{NewUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    ExternalIdentity, IdentityProvider, SignUpOrInOutcome, UserRepository, UserService,
};

/// Default [`UserService`].
pub struct AccountService {
    identity: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(identity: Arc<dyn IdentityProvider>, users: Arc<dyn UserRepository>) -> Self {
        Self { identity, users }
    }

    async fn register(&self, identity: ExternalIdentity) -> Result<SignUpOrInOutcome, DomainError> {
        let name = identity.name.unwrap_or_else(|| identity.subject.clone());

        match self.users.create(NewUser::new(identity.subject.clone(), name)).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, "Registered new user");
                Ok(SignUpOrInOutcome {
                    user,
                    created: true,
                })
            }
            // A concurrent request registered the same subject first.
            Err(RepoError::Constraint(_)) => {
                let user = self
                    .users
                    .find_by_subject(&identity.subject)
                    .await?
                    .ok_or_else(|| {
                        DomainError::Internal("user missing after subject conflict".to_string())
                    })?;
                Ok(SignUpOrInOutcome {
                    user,
                    created: false,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn sign_in(&self, mut user: User, name: Option<String>) -> Result<User, DomainError> {
        match name {
            Some(name) if name != user.name => {
                user.rename(name);
                let user = self.users.save(user).await?;
                tracing::debug!(user_id = user.id, "Updated user name from identity provider");
                Ok(user)
            }
            _ => Ok(user),
        }
    }
}

fn ensure_subject(identity: &ExternalIdentity) -> Result<(), DomainError> {
    if identity.subject.trim().is_empty() {
        return Err(DomainError::Validation(
            "identity subject must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl UserService for AccountService {
    async fn sign_up_or_in(
        &self,
        request: SignUpOrInRequest,
    ) -> Result<SignUpOrInOutcome, DomainError> {
        let identity = self.identity.identify(&request).await?;
        ensure_subject(&identity)?;

        match self.users.find_by_subject(&identity.subject).await? {
            Some(user) => {
                let user = self.sign_in(user, identity.name).await?;
                tracing::info!(user_id = user.id, "User signed in");
                Ok(SignUpOrInOutcome {
                    user,
                    created: false,
                })
            }
            None => self.register(identity).await,
        }
    }

    async fn get_user_info(&self, access_token: &str) -> Result<UserInfo, DomainError> {
        let identity = self.identity.identify_token(access_token).await?;
        ensure_subject(&identity)?;

        let user = self
            .users
            .find_by_subject(&identity.subject)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "user",
                key: identity.subject,
            })?;

        Ok(user.info())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::ports::{AuthError, BaseRepository};

    /// Identity provider that treats the token itself as the subject.
    struct EchoIdentity;

    #[async_trait]
    impl IdentityProvider for EchoIdentity {
        async fn identify(
            &self,
            request: &SignUpOrInRequest,
        ) -> Result<ExternalIdentity, AuthError> {
            let subject = request
                .get_str("accessToken")
                .ok_or_else(|| AuthError::MissingCredential("accessToken".to_string()))?;
            Ok(ExternalIdentity {
                subject: subject.to_string(),
                name: request.get_str("name").map(String::from),
            })
        }

        async fn identify_token(&self, access_token: &str) -> Result<ExternalIdentity, AuthError> {
            if access_token == "expired" {
                return Err(AuthError::TokenExpired);
            }
            Ok(ExternalIdentity {
                subject: access_token.to_string(),
                name: None,
            })
        }
    }

    #[derive(Default)]
    struct FakeUsers {
        rows: Mutex<HashMap<i64, User>>,
        // Subject whose `create` loses a race to a concurrent insert.
        racing_subject: Option<String>,
    }

    #[async_trait]
    impl BaseRepository<User, i64> for FakeUsers {
        async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, user: User) -> Result<User, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if !rows.contains_key(&user.id) {
                return Err(RepoError::NotFound);
            }
            rows.insert(user.id, user.clone());
            Ok(user)
        }
    }

    #[async_trait]
    impl UserRepository for FakeUsers {
        async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, RepoError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().find(|u| u.subject == subject).cloned())
        }

        async fn create(&self, user: NewUser) -> Result<User, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            if self.racing_subject.as_deref() == Some(user.subject.as_str()) {
                let id = rows.len() as i64 + 1;
                rows.insert(id, NewUser::new(user.subject.clone(), "winner").with_id(id));
                return Err(RepoError::Constraint("subject".to_string()));
            }
            if rows.values().any(|u| u.subject == user.subject) {
                return Err(RepoError::Constraint("subject".to_string()));
            }
            let id = rows.len() as i64 + 1;
            let user = user.with_id(id);
            rows.insert(id, user.clone());
            Ok(user)
        }
    }

    fn service_with(users: Arc<FakeUsers>) -> AccountService {
        AccountService::new(Arc::new(EchoIdentity), users)
    }

    fn request(value: serde_json::Value) -> SignUpOrInRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_first_call_registers_second_signs_in() {
        let service = service_with(Arc::new(FakeUsers::default()));

        let first = service
            .sign_up_or_in(request(serde_json::json!({ "accessToken": "kakao-1", "name": "alice" })))
            .await
            .unwrap();
        let second = service
            .sign_up_or_in(request(serde_json::json!({ "accessToken": "kakao-1" })))
            .await
            .unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.user.id, second.user.id);
        assert_eq!(second.user.name, "alice");
    }

    #[tokio::test]
    async fn test_name_defaults_to_subject() {
        let service = service_with(Arc::new(FakeUsers::default()));

        let outcome = service
            .sign_up_or_in(request(serde_json::json!({ "accessToken": "kakao-9" })))
            .await
            .unwrap();

        assert_eq!(outcome.user.name, "kakao-9");
    }

    #[tokio::test]
    async fn test_sign_in_updates_changed_name() {
        let users = Arc::new(FakeUsers::default());
        let service = service_with(users.clone());

        service
            .sign_up_or_in(request(serde_json::json!({ "accessToken": "kakao-1", "name": "alice" })))
            .await
            .unwrap();
        let outcome = service
            .sign_up_or_in(request(serde_json::json!({ "accessToken": "kakao-1", "name": "alicia" })))
            .await
            .unwrap();

        assert_eq!(outcome.user.name, "alicia");
        let stored = users.find_by_id(outcome.user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "alicia");
    }

    #[tokio::test]
    async fn test_subject_conflict_resolves_to_existing_user() {
        let users = Arc::new(FakeUsers {
            racing_subject: Some("kakao-1".to_string()),
            ..Default::default()
        });
        let service = service_with(users);

        let outcome = service
            .sign_up_or_in(request(serde_json::json!({ "accessToken": "kakao-1" })))
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.user.name, "winner");
    }

    #[tokio::test]
    async fn test_missing_credential_is_auth_error() {
        let service = service_with(Arc::new(FakeUsers::default()));

        let result = service.sign_up_or_in(request(serde_json::json!({}))).await;

        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::MissingCredential(_)))
        ));
    }

    #[tokio::test]
    async fn test_blank_subject_is_rejected() {
        let service = service_with(Arc::new(FakeUsers::default()));

        let result = service
            .sign_up_or_in(request(serde_json::json!({ "accessToken": "  " })))
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_user_info_for_known_user() {
        let service = service_with(Arc::new(FakeUsers::default()));
        let outcome = service
            .sign_up_or_in(request(serde_json::json!({ "accessToken": "kakao-1", "name": "alice" })))
            .await
            .unwrap();

        let first = service.get_user_info("kakao-1").await.unwrap();
        let second = service.get_user_info("kakao-1").await.unwrap();

        assert_eq!(
            first,
            UserInfo {
                id: outcome.user.id,
                name: "alice".to_string()
            }
        );
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_user_info_unknown_subject_is_not_found() {
        let service = service_with(Arc::new(FakeUsers::default()));

        let result = service.get_user_info("nobody").await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_user_info_propagates_token_errors() {
        let service = service_with(Arc::new(FakeUsers::default()));

        let result = service.get_user_info("expired").await;

        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::TokenExpired))
        ));
    }
}
