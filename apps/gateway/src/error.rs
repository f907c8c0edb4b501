use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, PageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(msg) => AppError::BadRequest(msg),
            GatewayError::UnknownState(state) => {
                AppError::BadRequest(format!("Unknown state: {}", state))
            }
            GatewayError::Upstream(msg) => AppError::BadGateway(msg),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<PageError> for GatewayError {
    fn from(err: PageError) -> Self {
        GatewayError::Validation(err.to_string())
    }
}
