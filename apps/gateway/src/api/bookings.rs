use axum::{
    extract::{Query, State},
    response::Response,
    routing::{get, patch},
    Router,
};
use axum_helpers::{PageRequest, SharerId, UuidPath, ValidatedJson};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::{GatewayError, GatewayResult};

/// Booking creation payload as accepted at the boundary
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookItemRequest {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// State filter values the gateway lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BookingState {
    All,
    Past,
    Current,
    Future,
    Waiting,
    Rejected,
}

impl FromStr for BookingState {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(BookingState::All),
            "PAST" => Ok(BookingState::Past),
            "CURRENT" => Ok(BookingState::Current),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(GatewayError::UnknownState(s.to_string())),
        }
    }
}

/// The booking window must lie in the future and be non-empty.
fn check_booking_window(start: DateTime<Utc>, end: DateTime<Utc>) -> GatewayResult<()> {
    if end <= start {
        return Err(GatewayError::Validation(
            "booking start must be strictly before its end".to_string(),
        ));
    }
    if start < Utc::now() {
        return Err(GatewayError::Validation(
            "booking start must not be in the past".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_state")]
    state: String,
    #[serde(default)]
    from: i64,
    #[serde(default = "axum_helpers::pagination::default_size")]
    size: i64,
}

fn default_state() -> String {
    "all".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ApprovalQuery {
    approved: bool,
}

pub fn router(client: Arc<ApiClient>) -> Router {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(set_approval))
        .route("/{id}/cancel", patch(cancel_booking))
        .with_state(client)
}

async fn create_booking(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    ValidatedJson(payload): ValidatedJson<BookItemRequest>,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, item_id = %payload.item_id, "Creating booking");
    check_booking_window(payload.start, payload.end)?;

    let body = serde_json::to_value(&payload)
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    client
        .forward(Method::POST, "/bookings", Some(user_id), &[], Some(body))
        .await
}

async fn get_booking(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, booking_id = %id, "Fetching booking");
    client
        .forward(
            Method::GET,
            &format!("/bookings/{id}"),
            Some(user_id),
            &[],
            None,
        )
        .await
}

async fn list_bookings(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    Query(query): Query<ListQuery>,
) -> GatewayResult<Response> {
    forward_listing(&client, "/bookings", user_id, query).await
}

async fn list_owner_bookings(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    Query(query): Query<ListQuery>,
) -> GatewayResult<Response> {
    forward_listing(&client, "/bookings/owner", user_id, query).await
}

async fn forward_listing(
    client: &ApiClient,
    path: &str,
    user_id: Uuid,
    query: ListQuery,
) -> GatewayResult<Response> {
    query.state.parse::<BookingState>()?;
    PageRequest::new(query.from, query.size).validate()?;

    tracing::info!(%user_id, state = %query.state, from = query.from, size = query.size, "Listing bookings");

    client
        .forward(
            Method::GET,
            path,
            Some(user_id),
            &[
                ("state", query.state),
                ("from", query.from.to_string()),
                ("size", query.size.to_string()),
            ],
            None,
        )
        .await
}

async fn set_approval(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    Query(query): Query<ApprovalQuery>,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, booking_id = %id, approved = query.approved, "Setting booking approval");
    client
        .forward(
            Method::PATCH,
            &format!("/bookings/{id}"),
            Some(user_id),
            &[("approved", query.approved.to_string())],
            None,
        )
        .await
}

async fn cancel_booking(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, booking_id = %id, "Canceling booking");
    client
        .forward(
            Method::PATCH,
            &format!("/bookings/{id}/cancel"),
            Some(user_id),
            &[],
            None,
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_booking_state_parses_case_insensitively() {
        assert_eq!("all".parse::<BookingState>().unwrap(), BookingState::All);
        assert_eq!("PAST".parse::<BookingState>().unwrap(), BookingState::Past);
        assert_eq!(
            "Waiting".parse::<BookingState>().unwrap(),
            BookingState::Waiting
        );
    }

    #[test]
    fn test_booking_state_rejects_unknown() {
        let err = "sometimes".parse::<BookingState>().unwrap_err();
        assert!(matches!(err, GatewayError::UnknownState(s) if s == "sometimes"));
    }

    #[test]
    fn test_window_rejects_inverted_and_empty_ranges() {
        let start = Utc::now() + Duration::hours(1);

        assert!(check_booking_window(start, start).is_err());
        assert!(check_booking_window(start, start - Duration::minutes(1)).is_err());
        assert!(check_booking_window(start, start + Duration::hours(1)).is_ok());
    }

    #[test]
    fn test_window_rejects_past_start() {
        let start = Utc::now() - Duration::hours(1);
        let result = check_booking_window(start, start + Duration::hours(3));
        assert!(matches!(result, Err(GatewayError::Validation(_))));
    }
}
