//! Caller-identity header extractor.

use crate::errors::AppError;
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Header carrying the id of the user performing the request.
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Extractor for the `X-Sharer-User-Id` caller-identity header.
///
/// Every endpoint that acts on behalf of a user takes this extractor. A
/// missing or malformed header is a boundary validation failure (400) and
/// never reaches the service layer.
///
/// # Example
/// ```ignore
/// use axum_helpers::SharerId;
///
/// async fn list_bookings(SharerId(user_id): SharerId) { /* ... */ }
/// ```
pub struct SharerId(pub Uuid);

impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SHARER_USER_ID_HEADER)
            .ok_or_else(|| {
                AppError::BadRequest(format!("{} header is required", SHARER_USER_ID_HEADER))
                    .into_response()
            })?
            .to_str()
            .map_err(|_| {
                AppError::BadRequest(format!("{} header is not valid UTF-8", SHARER_USER_ID_HEADER))
                    .into_response()
            })?;

        match Uuid::parse_str(value) {
            Ok(id) => Ok(SharerId(id)),
            Err(_) => Err(AppError::BadRequest(format!(
                "{} header must be a UUID, got '{}'",
                SHARER_USER_ID_HEADER, value
            ))
            .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequestParts;
    use axum::http::{Request, StatusCode};

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/bookings");
        if let Some(v) = value {
            builder = builder.header(SHARER_USER_ID_HEADER, v);
        }
        let (parts, _) = builder.body(Body::empty()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn test_valid_header_is_extracted() {
        let id = Uuid::now_v7();
        let mut parts = parts_with_header(Some(&id.to_string()));

        let SharerId(extracted) = SharerId::from_request_parts(&mut parts, &())
            .await
            .expect("extraction should succeed");
        assert_eq!(extracted, id);
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let mut parts = parts_with_header(None);

        let rejection = SharerId::from_request_parts(&mut parts, &())
            .await
            .err()
            .expect("extraction should fail");
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_header_is_rejected() {
        let mut parts = parts_with_header(Some("42"));

        let rejection = SharerId::from_request_parts(&mut parts, &())
            .await
            .err()
            .expect("extraction should fail");
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }
}
