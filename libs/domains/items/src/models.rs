use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Shareable item listed by an owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique identifier
    pub id: Uuid,
    /// Item name
    pub name: String,
    /// Item description
    pub description: String,
    /// Whether the item can currently be booked
    pub available: bool,
    /// The owning user
    pub owner_id: Uuid,
    /// The item request this item fulfills, if any
    pub request_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(input: CreateItem, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            available: input.available,
            owner_id,
            request_id: input.request_id,
            created_at: Utc::now(),
        }
    }

    /// Apply a partial update, overwriting only the provided fields.
    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(available) = update.available {
            self.available = available;
        }
    }
}

/// DTO for listing a new item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    pub available: bool,
    /// Request this listing fulfills, if any
    pub request_id: Option<Uuid>,
}

/// DTO for the owner's partial item update
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Reference to a booking shown on the owner's item view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingRef {
    pub id: Uuid,
    pub booker_id: Uuid,
}

/// Comment left on an item after a finished rental
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(text: String, item_id: Uuid, author_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            text,
            item_id,
            author_id,
            created_at: Utc::now(),
        }
    }
}

/// DTO for posting a comment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
}

/// Comment as rendered to clients, with the author's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CommentView {
    pub id: Uuid,
    pub text: String,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// The slice of a booking this domain needs for item views and comment
/// eligibility. Provided by the booking domain through [`ItemBookingLookup`].
///
/// [`ItemBookingLookup`]: crate::repository::ItemBookingLookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBookingSlice {
    pub id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub approved: bool,
}

/// Item enriched for API responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
    /// Most recent approved booking already started; owner view only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<BookingRef>,
    /// Nearest booking still to start; owner view only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_booking: Option<BookingRef>,
    pub comments: Vec<CommentView>,
}

impl ItemResponse {
    pub fn from_item(item: Item, comments: Vec<CommentView>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
            last_booking: None,
            next_booking: None,
            comments,
        }
    }
}
