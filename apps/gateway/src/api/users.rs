use axum::{
    extract::State,
    response::Response,
    routing::get,
    Router,
};
use axum_helpers::{UuidPath, ValidatedJson};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::{GatewayError, GatewayResult};

/// User creation payload as accepted at the boundary
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 255))]
    pub email: String,
}

/// Partial user update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(email, length(max = 255))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

pub fn router(client: Arc<ApiClient>) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(client)
}

async fn list_users(State(client): State<Arc<ApiClient>>) -> GatewayResult<Response> {
    tracing::info!("Listing users");
    client.forward(Method::GET, "/users", None, &[], None).await
}

async fn create_user(
    State(client): State<Arc<ApiClient>>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> GatewayResult<Response> {
    tracing::info!(email = %payload.email, "Creating user");

    let body = serde_json::to_value(&payload)
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    client
        .forward(Method::POST, "/users", None, &[], Some(body))
        .await
}

async fn get_user(
    State(client): State<Arc<ApiClient>>,
    UuidPath(id): UuidPath,
) -> GatewayResult<Response> {
    tracing::info!(user_id = %id, "Fetching user");
    client
        .forward(Method::GET, &format!("/users/{id}"), None, &[], None)
        .await
}

async fn update_user(
    State(client): State<Arc<ApiClient>>,
    UuidPath(id): UuidPath,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> GatewayResult<Response> {
    tracing::info!(user_id = %id, "Updating user");

    let body = serde_json::to_value(&payload)
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    client
        .forward(
            Method::PATCH,
            &format!("/users/{id}"),
            None,
            &[],
            Some(body),
        )
        .await
}

async fn delete_user(
    State(client): State<Arc<ApiClient>>,
    UuidPath(id): UuidPath,
) -> GatewayResult<Response> {
    tracing::info!(user_id = %id, "Deleting user");
    client
        .forward(Method::DELETE, &format!("/users/{id}"), None, &[], None)
        .await
}
