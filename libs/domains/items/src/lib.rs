//! Item catalog domain.
//!
//! Shareable items listed by their owners, plus the comments left by users
//! who rented them. Owner views are augmented with the neighbouring
//! bookings of each item, resolved through the [`ItemBookingLookup`] port
//! implemented by the booking domain.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use models::{
    BookingRef, Comment, CommentView, CreateComment, CreateItem, Item, ItemBookingSlice,
    ItemResponse, UpdateItem,
};
pub use postgres::{PgCommentRepository, PgItemRepository};
pub use repository::{CommentRepository, ItemBookingLookup, ItemRepository};
pub use service::ItemService;

#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockCommentRepository, MockItemBookingLookup, MockItemRepository};
