use async_trait::async_trait;
use axum_helpers::Page;
use uuid::Uuid;

use crate::error::RequestResult;
use crate::models::{ItemRequest, RequestedItem};

/// Repository trait for ItemRequest persistence
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    /// Persist a new item request
    async fn create(&self, request: ItemRequest) -> RequestResult<ItemRequest>;

    /// Get an item request by ID
    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>>;

    /// All requests posted by one user, newest first, unpaged
    async fn list_by_requester(&self, requester_id: Uuid) -> RequestResult<Vec<ItemRequest>>;

    /// Requests posted by everyone except `user_id`, newest first
    async fn list_others(&self, user_id: Uuid, page: Page) -> RequestResult<Vec<ItemRequest>>;
}

/// Port for resolving the items listed against a request.
///
/// Implemented by the item catalog's repository; this domain only consumes
/// the summaries.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait RequestItemLookup: Send + Sync {
    /// Items whose `request_id` references the given request
    async fn items_for_request(&self, request_id: Uuid) -> RequestResult<Vec<RequestedItem>>;
}
