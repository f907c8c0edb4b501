use axum_helpers::PageRequest;
use chrono::Utc;
use domain_items::ItemRepository;
use domain_users::UserRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};
use crate::models::{
    Booking, BookingOrdering, BookingStatus, CreateBooking, NewBooking, StateFilter,
};
use crate::repository::BookingRepository;

/// Service layer for the booking lifecycle.
///
/// Every operation is fail-fast: the first failing precondition aborts with
/// its own error and nothing is retried.
pub struct BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    repository: Arc<B>,
    items: Arc<I>,
    users: Arc<U>,
}

impl<B, I, U> BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    pub fn new(repository: B, items: Arc<I>, users: Arc<U>) -> Self {
        Self {
            repository: Arc::new(repository),
            items,
            users,
        }
    }

    /// Book an item for a time window.
    ///
    /// The window must be non-empty (`start` strictly before `end`) — the
    /// boundary validates this too, but the invariant is re-checked here
    /// because callers may reach the service directly. The item must exist
    /// and be available, the booker must exist and must not own the item.
    #[instrument(skip(self, input), fields(item_id = %input.item_id))]
    pub async fn create_booking(
        &self,
        booker_id: Uuid,
        input: CreateBooking,
    ) -> BookingResult<Booking> {
        if input.start >= input.end {
            return Err(BookingError::Validation(
                "booking start must be strictly before its end".to_string(),
            ));
        }

        let item = self
            .items
            .get_by_id(input.item_id)
            .await
            .map_err(BookingError::from)?
            .ok_or(BookingError::ItemNotFound(input.item_id))?;

        if !item.available {
            return Err(BookingError::ItemUnavailable(item.id));
        }

        if !self
            .users
            .exists(booker_id)
            .await
            .map_err(BookingError::from)?
        {
            return Err(BookingError::UserNotFound(booker_id));
        }

        if item.owner_id == booker_id {
            return Err(BookingError::OwnItem(item.id));
        }

        self.repository
            .create(NewBooking {
                item_id: item.id,
                booker_id,
                start: input.start,
                end: input.end,
                status: BookingStatus::Waiting,
            })
            .await
    }

    /// Approve or reject a waiting booking.
    ///
    /// Only the item's owner may decide. The transition is a conditional
    /// update guarded on "not already approved": once APPROVED, both
    /// approving and rejecting fail with a conflict.
    #[instrument(skip(self))]
    pub async fn set_approval(
        &self,
        owner_id: Uuid,
        booking_id: Uuid,
        approved: bool,
    ) -> BookingResult<Booking> {
        if !self
            .users
            .exists(owner_id)
            .await
            .map_err(BookingError::from)?
        {
            return Err(BookingError::UserNotFound(owner_id));
        }

        let booking = self
            .repository
            .get(booking_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))?;

        if booking.item_owner_id != owner_id {
            return Err(BookingError::NotOwner {
                user_id: owner_id,
                booking_id,
            });
        }

        let target = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        self.repository
            .set_status_unless(booking_id, target, BookingStatus::Approved)
            .await?
            .ok_or(BookingError::AlreadyApproved(booking_id))
    }

    /// Withdraw a booking the caller placed, while it is still WAITING.
    #[instrument(skip(self))]
    pub async fn cancel_booking(
        &self,
        booker_id: Uuid,
        booking_id: Uuid,
    ) -> BookingResult<Booking> {
        let booking = self
            .repository
            .get(booking_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))?;

        if booking.booker.id != booker_id {
            return Err(BookingError::NotBooker {
                user_id: booker_id,
                booking_id,
            });
        }

        self.repository
            .set_status_if_current(booking_id, BookingStatus::Canceled, BookingStatus::Waiting)
            .await?
            .ok_or(BookingError::CancelNotAllowed(booking_id))
    }

    /// Fetch a booking, visible only to its booker or the item's owner.
    #[instrument(skip(self))]
    pub async fn get_booking(&self, caller_id: Uuid, booking_id: Uuid) -> BookingResult<Booking> {
        let booking = self
            .repository
            .get(booking_id)
            .await?
            .ok_or(BookingError::NotFound(booking_id))?;

        if booking.booker.id != caller_id && booking.item_owner_id != caller_id {
            return Err(BookingError::NotParticipant {
                user_id: caller_id,
                booking_id,
            });
        }

        Ok(booking)
    }

    /// The caller's bookings narrowed by the state filter, newest start
    /// first.
    #[instrument(skip(self))]
    pub async fn list_for_booker(
        &self,
        user_id: Uuid,
        filter: StateFilter,
        page: PageRequest,
    ) -> BookingResult<Vec<Booking>> {
        self.check_user(user_id).await?;
        let page = page.validate()?;

        self.repository
            .list_for_booker(
                user_id,
                filter,
                Utc::now(),
                page,
                BookingOrdering::StartDesc,
            )
            .await
    }

    /// Bookings placed against the caller's items, same filter semantics.
    #[instrument(skip(self))]
    pub async fn list_for_owner(
        &self,
        user_id: Uuid,
        filter: StateFilter,
        page: PageRequest,
    ) -> BookingResult<Vec<Booking>> {
        self.check_user(user_id).await?;
        let page = page.validate()?;

        self.repository
            .list_for_owner(
                user_id,
                filter,
                Utc::now(),
                page,
                BookingOrdering::StartDesc,
            )
            .await
    }

    async fn check_user(&self, user_id: Uuid) -> BookingResult<()> {
        if !self
            .users
            .exists(user_id)
            .await
            .map_err(BookingError::from)?
        {
            return Err(BookingError::UserNotFound(user_id));
        }
        Ok(())
    }
}

impl<B, I, U> Clone for BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            items: Arc::clone(&self.items),
            users: Arc::clone(&self.users),
        }
    }
}
