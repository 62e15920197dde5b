//! Application state - shared across all handlers.

use std::sync::Arc;

use ppobbi_core::AccountService;
use ppobbi_core::ports::{IdentityProvider, UserRepository, UserService};
use ppobbi_infra::{InMemoryUserRepository, JwtIdentityProvider};

#[cfg(feature = "postgres")]
use ppobbi_infra::PostgresUserRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Backing user store, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Wire the handlers to an explicit user service.
    pub fn new(user_service: Arc<dyn UserService>, storage: &'static str) -> Self {
        Self {
            user_service,
            storage,
        }
    }

    /// Build the default account service from configuration.
    pub async fn from_config(config: &AppConfig) -> Self {
        let jwt = JwtIdentityProvider::new(config.jwt.clone());
        tracing::info!(
            issuer = %config.jwt.issuer,
            token_lifetime_secs = jwt.expiration_seconds(),
            "JWT identity provider ready"
        );
        let identity: Arc<dyn IdentityProvider> = Arc::new(jwt);

        let (users, storage) = Self::user_repository(config).await;

        tracing::info!(storage, "Application state initialized");

        Self::new(Arc::new(AccountService::new(identity, users)), storage)
    }

    #[cfg(feature = "postgres")]
    async fn user_repository(config: &AppConfig) -> (Arc<dyn UserRepository>, &'static str) {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Arc::new(InMemoryUserRepository::new()), "memory");
        };

        match ppobbi_infra::database::connect(db_config).await {
            Ok(conn) => (Arc::new(PostgresUserRepository::new(conn)), "postgres"),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (Arc::new(InMemoryUserRepository::new()), "memory")
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn user_repository(config: &AppConfig) -> (Arc<dyn UserRepository>, &'static str) {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory repository");
        (Arc::new(InMemoryUserRepository::new()), "memory")
    }
}
