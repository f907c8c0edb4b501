use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, PageError};
use domain_items::ItemError;
use domain_users::UserError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::UnknownState;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Item {0} is not available for booking")]
    ItemUnavailable(Uuid),

    #[error("Owner cannot book their own item {0}")]
    OwnItem(Uuid),

    #[error("User {user_id} does not own the item of booking {booking_id}")]
    NotOwner { user_id: Uuid, booking_id: Uuid },

    #[error("User {user_id} did not place booking {booking_id}")]
    NotBooker { user_id: Uuid, booking_id: Uuid },

    #[error("User {user_id} is neither booker nor owner of booking {booking_id}")]
    NotParticipant { user_id: Uuid, booking_id: Uuid },

    #[error("Booking {0} is already approved and cannot change status")]
    AlreadyApproved(Uuid),

    #[error("Booking {0} is not waiting and cannot be canceled")]
    CancelNotAllowed(Uuid),

    #[error(transparent)]
    UnknownState(#[from] UnknownState),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Convert BookingError to AppError for standardized error responses.
///
/// Authorization failures report as not-found so a caller cannot tell a
/// foreign booking from a missing one.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(id)
            | BookingError::NotOwner { booking_id: id, .. }
            | BookingError::NotBooker { booking_id: id, .. }
            | BookingError::NotParticipant { booking_id: id, .. } => {
                AppError::NotFound(format!("Booking {} not found", id))
            }
            BookingError::ItemNotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            BookingError::UserNotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            BookingError::ItemUnavailable(id) => {
                AppError::BadRequest(format!("Item {} is not available for booking", id))
            }
            BookingError::OwnItem(id) => {
                AppError::BadRequest(format!("Owner cannot book their own item {}", id))
            }
            BookingError::AlreadyApproved(id) => AppError::Conflict(format!(
                "Booking {} is already approved and cannot change status",
                id
            )),
            BookingError::CancelNotAllowed(id) => AppError::Conflict(format!(
                "Booking {} is not waiting and cannot be canceled",
                id
            )),
            BookingError::UnknownState(e) => AppError::BadRequest(e.to_string()),
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::Database(msg) => AppError::InternalServerError(msg),
            BookingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for BookingError {
    fn from(err: DbErr) -> Self {
        BookingError::Database(err.to_string())
    }
}

impl From<PageError> for BookingError {
    fn from(err: PageError) -> Self {
        BookingError::Validation(err.to_string())
    }
}

impl From<UserError> for BookingError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => BookingError::UserNotFound(id),
            UserError::Database(msg) => BookingError::Database(msg),
            other => BookingError::Internal(other.to_string()),
        }
    }
}

impl From<ItemError> for BookingError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => BookingError::ItemNotFound(id),
            ItemError::UserNotFound(id) => BookingError::UserNotFound(id),
            ItemError::Database(msg) => BookingError::Database(msg),
            other => BookingError::Internal(other.to_string()),
        }
    }
}
