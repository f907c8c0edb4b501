use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User account record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address (unique across the registry)
    pub email: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
}

/// DTO for partially updating an existing user.
///
/// Only fields present in the payload are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
}

impl User {
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            email,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update, overwriting only the provided fields.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let mut user = User::new("Anna".to_string(), "anna@example.com".to_string());

        user.apply_update(UpdateUser {
            name: Some("Anya".to_string()),
            email: None,
        });

        assert_eq!(user.name, "Anya");
        assert_eq!(user.email, "anna@example.com");
    }

    #[test]
    fn test_apply_update_with_empty_patch_is_noop() {
        let mut user = User::new("Anna".to_string(), "anna@example.com".to_string());
        let before = user.clone();

        user.apply_update(UpdateUser::default());

        assert_eq!(user, before);
    }
}
