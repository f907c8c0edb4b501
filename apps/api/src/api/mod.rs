use axum::Router;
use std::sync::Arc;

pub mod health;

use domain_bookings::{BookingService, PgBookingRepository};
use domain_items::{ItemService, PgCommentRepository, PgItemRepository};
use domain_requests::{ItemRequestService, PgItemRequestRepository};
use domain_users::{PgUserRepository, UserService};

/// Creates the API routes without the `/api` prefix; `create_router` adds it.
///
/// Builds the Postgres repositories once and wires them into the domain
/// services. Repositories are cheap clones around the shared connection
/// pool; the ports between domains (request enrichment, item booking
/// lookups) are satisfied by the neighbouring domain's repository.
pub fn routes(state: &crate::state::AppState) -> Router {
    let user_repo = PgUserRepository::new(state.db.clone());
    let request_repo = PgItemRequestRepository::new(state.db.clone());
    let item_repo = PgItemRepository::new(state.db.clone());
    let comment_repo = PgCommentRepository::new(state.db.clone());
    let booking_repo = PgBookingRepository::new(state.db.clone());

    let users = Arc::new(user_repo.clone());

    let user_service = UserService::new(user_repo);

    let request_service = ItemRequestService::new(
        request_repo.clone(),
        Arc::clone(&users),
        Arc::new(item_repo.clone()),
    );

    let item_service = ItemService::new(
        item_repo.clone(),
        comment_repo,
        Arc::clone(&users),
        Arc::new(request_repo),
        Arc::new(booking_repo.clone()),
    );

    let booking_service =
        BookingService::new(booking_repo, Arc::new(item_repo), Arc::clone(&users));

    Router::new()
        .nest("/users", domain_users::handlers::router(user_service))
        .nest("/requests", domain_requests::handlers::router(request_service))
        .nest("/items", domain_items::handlers::router(item_service))
        .nest("/bookings", domain_bookings::handlers::router(booking_service))
}

/// Creates a router with the /ready endpoint performing real health checks.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
