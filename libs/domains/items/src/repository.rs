use async_trait::async_trait;
use axum_helpers::Page;
use uuid::Uuid;

use crate::error::ItemResult;
use crate::models::{Comment, CommentView, Item, ItemBookingSlice};

/// Repository trait for Item persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item
    async fn create(&self, item: Item) -> ItemResult<Item>;

    /// Get an item by ID
    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>>;

    /// Get an item only if it belongs to the given owner.
    ///
    /// Non-owner lookups come back empty, which callers report as
    /// not-found rather than revealing the item exists.
    async fn get_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> ItemResult<Option<Item>>;

    /// Update an existing item
    async fn update(&self, item: Item) -> ItemResult<Item>;

    /// The owner's items, ordered by id ascending
    async fn list_by_owner(&self, owner_id: Uuid, page: Page) -> ItemResult<Vec<Item>>;

    /// Case-insensitive substring search over name and description,
    /// restricted to available items
    async fn search(&self, text: &str, page: Page) -> ItemResult<Vec<Item>>;
}

/// Repository trait for Comment persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment
    async fn create(&self, comment: Comment) -> ItemResult<Comment>;

    /// All comments on an item with their author names, newest first
    async fn list_for_item(&self, item_id: Uuid) -> ItemResult<Vec<CommentView>>;
}

/// Port for reading an item's bookings.
///
/// Implemented by the booking domain's repository; used to decorate owner
/// item views with neighbouring bookings and to gate comment creation.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ItemBookingLookup: Send + Sync {
    /// All bookings recorded against the item
    async fn bookings_for_item(&self, item_id: Uuid) -> ItemResult<Vec<ItemBookingSlice>>;
}
