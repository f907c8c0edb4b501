use axum::Router;
use std::sync::Arc;

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

use crate::client::ApiClient;

/// Assemble the gateway surface: one validating router per resource, all
/// forwarding to the core API.
pub fn routes(client: ApiClient) -> Router {
    let client = Arc::new(client);

    Router::new()
        .nest("/bookings", bookings::router(Arc::clone(&client)))
        .nest("/items", items::router(Arc::clone(&client)))
        .nest("/requests", requests::router(Arc::clone(&client)))
        .nest("/users", users::router(client))
}
