//! Booking lifecycle domain.
//!
//! Creates bookings against available items, runs the approval lifecycle
//! (WAITING → APPROVED/REJECTED, booker-initiated cancel while WAITING),
//! and serves state- and time-window-filtered listings for bookers and
//! item owners.
//!
//! Status transitions are single conditional updates in the store, so two
//! concurrent approvals cannot both succeed.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BookingError, BookingResult};
pub use models::{
    Booking, BookingOrdering, BookingStatus, CreateBooking, ItemRef, NewBooking, StateFilter,
    UserRef,
};
pub use postgres::PgBookingRepository;
pub use repository::BookingRepository;
pub use service::BookingService;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockBookingRepository;
