use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use axum_helpers::{PageRequest, SharerId, UuidPath, ValidatedJson};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::{GatewayError, GatewayResult};

/// Item-request creation payload as accepted at the boundary
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequestPayload {
    #[validate(length(min = 1, max = 500))]
    pub description: String,
}

pub fn router(client: Arc<ApiClient>) -> Router {
    Router::new()
        .route("/", get(list_own_requests).post(add_request))
        .route("/all", get(list_other_requests))
        .route("/{id}", get(get_request))
        .with_state(client)
}

async fn add_request(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    ValidatedJson(payload): ValidatedJson<CreateRequestPayload>,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, "Creating item request");

    let body = serde_json::to_value(&payload)
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    client
        .forward(Method::POST, "/requests", Some(user_id), &[], Some(body))
        .await
}

async fn list_own_requests(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, "Listing own item requests");
    client
        .forward(Method::GET, "/requests", Some(user_id), &[], None)
        .await
}

async fn list_other_requests(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageRequest>,
) -> GatewayResult<Response> {
    page.validate()?;

    tracing::info!(%user_id, from = page.from, size = page.size, "Listing other users' item requests");
    client
        .forward(
            Method::GET,
            "/requests/all",
            Some(user_id),
            &[
                ("from", page.from.to_string()),
                ("size", page.size.to_string()),
            ],
            None,
        )
        .await
}

async fn get_request(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, request_id = %id, "Fetching item request");
    client
        .forward(
            Method::GET,
            &format!("/requests/{id}"),
            Some(user_id),
            &[],
            None,
        )
        .await
}
