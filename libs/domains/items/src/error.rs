use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, PageError};
use domain_requests::RequestError;
use domain_users::UserError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Item request not found: {0}")]
    RequestNotFound(Uuid),

    #[error("User {user_id} has no finished approved booking for item {item_id}")]
    CommentNotAllowed { user_id: Uuid, item_id: Uuid },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            ItemError::RequestNotFound(id) => {
                AppError::NotFound(format!("Item request {} not found", id))
            }
            ItemError::CommentNotAllowed { user_id, item_id } => AppError::BadRequest(format!(
                "User {} cannot comment on item {} without a finished approved booking",
                user_id, item_id
            )),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Database(msg) => AppError::InternalServerError(msg),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for ItemError {
    fn from(err: DbErr) -> Self {
        ItemError::Database(err.to_string())
    }
}

impl From<PageError> for ItemError {
    fn from(err: PageError) -> Self {
        ItemError::Validation(err.to_string())
    }
}

impl From<UserError> for ItemError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => ItemError::UserNotFound(id),
            UserError::Database(msg) => ItemError::Database(msg),
            other => ItemError::Internal(other.to_string()),
        }
    }
}

impl From<RequestError> for ItemError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotFound(id) => ItemError::RequestNotFound(id),
            RequestError::UserNotFound(id) => ItemError::UserNotFound(id),
            RequestError::Database(msg) => ItemError::Database(msg),
            other => ItemError::Internal(other.to_string()),
        }
    }
}
