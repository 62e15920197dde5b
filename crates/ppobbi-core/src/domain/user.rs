use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ppobbi_shared::dto::UserInfo;

/// User entity - an account linked to one identity-provider subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Stable identifier of the account at the identity provider.
    pub subject: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Change the display name, bumping `updated_at`.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Public view of this user.
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// A user that has not been persisted yet; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub subject: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(subject: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Materialize with the id assigned by the store.
    pub fn with_id(self, id: i64) -> User {
        User {
            id,
            subject: self.subject,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}
