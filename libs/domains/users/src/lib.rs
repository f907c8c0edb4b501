//! User registry domain.
//!
//! Leaf dependency for the other domains: items, bookings and requests all
//! reference users through the [`UserRepository`] trait.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use models::{CreateUser, UpdateUser, User};
pub use postgres::PgUserRepository;
pub use repository::UserRepository;
pub use service::UserService;

#[cfg(any(test, feature = "mocks"))]
pub use repository::MockUserRepository;
