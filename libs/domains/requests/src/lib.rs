//! Item-request registry domain.
//!
//! Users post "wanted item" requests; other users fulfill them by listing
//! items that reference the request. The fulfilling-item list is assembled
//! at query time through the [`RequestItemLookup`] port, implemented by the
//! item catalog's repository.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{RequestError, RequestResult};
pub use models::{CreateItemRequest, ItemRequest, ItemRequestResponse, RequestedItem};
pub use postgres::PgItemRequestRepository;
pub use repository::{ItemRequestRepository, RequestItemLookup};
pub use service::ItemRequestService;

#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockItemRequestRepository, MockRequestItemLookup};
