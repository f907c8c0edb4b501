use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A "wanted item" post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemRequest {
    /// Unique identifier
    pub id: Uuid,
    /// What the requester is looking for
    pub description: String,
    /// The user who posted the request
    pub requester_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ItemRequest {
    pub fn new(description: String, requester_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            description,
            requester_id,
            created_at: Utc::now(),
        }
    }
}

/// DTO for posting a new item request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 500))]
    pub description: String,
}

/// Summary of an item that fulfills a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RequestedItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Uuid,
}

/// Item request enriched with the items listed against it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemRequestResponse {
    pub id: Uuid,
    pub description: String,
    pub requester_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<RequestedItem>,
}

impl ItemRequestResponse {
    pub fn from_request(request: ItemRequest, items: Vec<RequestedItem>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            requester_id: request.requester_id,
            created_at: request.created_at,
            items,
        }
    }
}
