use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a unique-index violation on the email column to the domain conflict.
fn map_insert_error(err: DbErr, email: &str) -> UserError {
    let err_str = err.to_string();
    if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
        UserError::DuplicateEmail(email.to_string())
    } else {
        UserError::Database(err_str)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let email = user.email.clone();
        let active: entity::ActiveModel = user.into();

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error(e, &email))?;

        tracing::info!(user_id = %model.id, email = %model.email, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let id = user.id;
        let email = user.email.clone();
        let active: entity::ActiveModel = user.into();

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => UserError::NotFound(id),
            other => map_insert_error(other, &email),
        })?;

        tracing::info!(user_id = %id, "Updated user");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists(&self, id: Uuid) -> UserResult<bool> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
