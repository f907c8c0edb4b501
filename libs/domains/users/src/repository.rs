use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence.
///
/// The other domains depend on this trait for referential checks (owner,
/// booker, requester, comment author).
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: User) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// List all users, newest first
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Update an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete a user by ID
    async fn delete(&self, id: Uuid) -> UserResult<bool>;

    /// Check if a user exists
    async fn exists(&self, id: Uuid) -> UserResult<bool>;

    /// Check if an email is already taken
    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}
