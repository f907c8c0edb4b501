use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for user registry business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user.
    ///
    /// Email uniqueness is enforced by the store; a violation surfaces as a
    /// conflict.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = User::new(input.name, input.email);
        self.repository.create(user).await
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// List all users
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        self.repository.list().await
    }

    /// Apply a partial update to an existing user
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let mut user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        // Changing email to one held by another user is a conflict
        if let Some(ref new_email) = input.email {
            if !new_email.eq_ignore_ascii_case(&user.email)
                && self.repository.email_exists(new_email).await?
            {
                return Err(UserError::DuplicateEmail(new_email.clone()));
            }
        }

        user.apply_update(input);
        self.repository.update(user).await
    }

    /// Delete a user by ID
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn sample_user() -> User {
        User::new("Anna".to_string(), "anna@example.com".to_string())
    }

    #[tokio::test]
    async fn test_create_user_persists_input() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|u| u.name == "Anna" && u.email == "anna@example.com")
            .returning(|u| Ok(u));

        let service = UserService::new(repo);
        let created = service
            .create_user(CreateUser {
                name: "Anna".to_string(),
                email: "anna@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.name, "Anna");
    }

    #[tokio::test]
    async fn test_create_user_rejects_invalid_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let service = UserService::new(repo);
        let result = service
            .create_user(CreateUser {
                name: "Anna".to_string(),
                email: "not-an-email".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_user_surfaces_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|u| Err(UserError::DuplicateEmail(u.email)));

        let service = UserService::new(repo);
        let result = service
            .create_user(CreateUser {
                name: "Anna".to_string(),
                email: "anna@example.com".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        let id = Uuid::now_v7();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = UserService::new(repo);
        let result = service.get_user(id).await;

        assert!(matches!(result, Err(UserError::NotFound(found)) if found == id));
    }

    #[tokio::test]
    async fn test_update_user_applies_only_present_fields() {
        let user = sample_user();
        let id = user.id;
        let stored = user.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_update()
            .withf(|u| u.name == "Anya" && u.email == "anna@example.com")
            .returning(|u| Ok(u));

        let service = UserService::new(repo);
        let updated = service
            .update_user(
                id,
                UpdateUser {
                    name: Some("Anya".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Anya");
        assert_eq!(updated.email, "anna@example.com");
    }

    #[tokio::test]
    async fn test_update_user_rejects_taken_email() {
        let user = sample_user();
        let id = user.id;
        let stored = user.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        repo.expect_email_exists()
            .with(eq("taken@example.com"))
            .returning(|_| Ok(true));
        repo.expect_update().never();

        let service = UserService::new(repo);
        let result = service
            .update_user(
                id,
                UpdateUser {
                    name: None,
                    email: Some("taken@example.com".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_update_user_keeps_own_email() {
        let user = sample_user();
        let id = user.id;
        let stored = user.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored.clone())));
        // Re-submitting the current email must not trigger the taken check
        repo.expect_email_exists().never();
        repo.expect_update().returning(|u| Ok(u));

        let service = UserService::new(repo);
        let updated = service
            .update_user(
                id,
                UpdateUser {
                    name: None,
                    email: Some("anna@example.com".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "anna@example.com");
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repo = MockUserRepository::new();
        let id = Uuid::now_v7();
        repo.expect_delete().with(eq(id)).returning(|_| Ok(false));

        let service = UserService::new(repo);
        let result = service.delete_user(id).await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
