use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, PageError};
use domain_users::UserError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Item request not found: {0}")]
    NotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type RequestResult<T> = Result<T, RequestError>;

/// Convert RequestError to AppError for standardized error responses
impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::NotFound(id) => {
                AppError::NotFound(format!("Item request {} not found", id))
            }
            RequestError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            RequestError::Validation(msg) => AppError::BadRequest(msg),
            RequestError::Database(msg) => AppError::InternalServerError(msg),
            RequestError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for RequestError {
    fn from(err: DbErr) -> Self {
        RequestError::Database(err.to_string())
    }
}

impl From<PageError> for RequestError {
    fn from(err: PageError) -> Self {
        RequestError::Validation(err.to_string())
    }
}

/// Errors bubbling up from the user registry keep their meaning
impl From<UserError> for RequestError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => RequestError::UserNotFound(id),
            UserError::Database(msg) => RequestError::Database(msg),
            other => RequestError::Internal(other.to_string()),
        }
    }
}
