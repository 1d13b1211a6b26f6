use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::User;
use crate::error::RepoError;

/// Credential store for user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user whose stored email equals `email` exactly.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user. A second record with the same email must fail
    /// with `RepoError::Constraint`.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Persist changes to an existing user.
    async fn update(&self, user: User) -> Result<User, RepoError>;
}
