use axum::{
    extract::{Query, State},
    response::Response,
    routing::{get, post},
    Router,
};
use axum_helpers::{PageRequest, SharerId, UuidPath, ValidatedJson};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::{GatewayError, GatewayResult};

/// Item creation payload as accepted at the boundary
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
}

/// Partial item update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

/// Comment payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    text: String,
    #[serde(default)]
    from: i64,
    #[serde(default = "axum_helpers::pagination::default_size")]
    size: i64,
}

pub fn router(client: Arc<ApiClient>) -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(client)
}

async fn list_items(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageRequest>,
) -> GatewayResult<Response> {
    page.validate()?;

    tracing::info!(%user_id, from = page.from, size = page.size, "Listing items");
    client
        .forward(
            Method::GET,
            "/items",
            Some(user_id),
            &[
                ("from", page.from.to_string()),
                ("size", page.size.to_string()),
            ],
            None,
        )
        .await
}

async fn create_item(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    ValidatedJson(payload): ValidatedJson<CreateItemRequest>,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, item_name = %payload.name, "Creating item");

    let body = serde_json::to_value(&payload)
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    client
        .forward(Method::POST, "/items", Some(user_id), &[], Some(body))
        .await
}

async fn search_items(
    State(client): State<Arc<ApiClient>>,
    Query(query): Query<SearchQuery>,
) -> GatewayResult<Response> {
    PageRequest::new(query.from, query.size).validate()?;

    tracing::info!(text = %query.text, "Searching items");
    client
        .forward(
            Method::GET,
            "/items/search",
            None,
            &[
                ("text", query.text),
                ("from", query.from.to_string()),
                ("size", query.size.to_string()),
            ],
            None,
        )
        .await
}

async fn get_item(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, item_id = %id, "Fetching item");
    client
        .forward(
            Method::GET,
            &format!("/items/{id}"),
            Some(user_id),
            &[],
            None,
        )
        .await
}

async fn update_item(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    ValidatedJson(payload): ValidatedJson<UpdateItemRequest>,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, item_id = %id, "Updating item");

    let body = serde_json::to_value(&payload)
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    client
        .forward(
            Method::PATCH,
            &format!("/items/{id}"),
            Some(user_id),
            &[],
            Some(body),
        )
        .await
}

async fn add_comment(
    State(client): State<Arc<ApiClient>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> GatewayResult<Response> {
    tracing::info!(%user_id, item_id = %id, "Adding comment");

    let body = serde_json::to_value(&payload)
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

    client
        .forward(
            Method::POST,
            &format!("/items/{id}/comment"),
            Some(user_id),
            &[],
            Some(body),
        )
        .await
}
