use async_trait::async_trait;
use axum_helpers::Page;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::BookingResult;
use crate::models::{Booking, BookingOrdering, BookingStatus, NewBooking, StateFilter};

/// Repository trait for Booking persistence.
///
/// Status transitions are conditional single-statement updates: the guard
/// and the write happen in one round-trip, so two racing transitions cannot
/// both pass the guard.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking and return it with item/booker summaries
    async fn create(&self, booking: NewBooking) -> BookingResult<Booking>;

    /// Get a booking by ID with item/booker summaries
    async fn get(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    /// Set the status unless the row currently holds `unless`.
    ///
    /// Returns the updated booking, or `None` when the guard blocked the
    /// write (the row holds `unless` or is gone).
    async fn set_status_unless(
        &self,
        id: Uuid,
        status: BookingStatus,
        unless: BookingStatus,
    ) -> BookingResult<Option<Booking>>;

    /// Set the status only while the row currently holds `expected`.
    ///
    /// Returns the updated booking, or `None` when the current status
    /// differs (or the row is gone).
    async fn set_status_if_current(
        &self,
        id: Uuid,
        status: BookingStatus,
        expected: BookingStatus,
    ) -> BookingResult<Option<Booking>>;

    /// Bookings placed by a user, narrowed by the state filter evaluated
    /// against `now`
    async fn list_for_booker(
        &self,
        booker_id: Uuid,
        filter: StateFilter,
        now: DateTime<Utc>,
        page: Page,
        order: BookingOrdering,
    ) -> BookingResult<Vec<Booking>>;

    /// Bookings placed against a user's items, same filter semantics
    async fn list_for_owner(
        &self,
        owner_id: Uuid,
        filter: StateFilter,
        now: DateTime<Utc>,
        page: Page,
        order: BookingOrdering,
    ) -> BookingResult<Vec<Booking>>;
}
