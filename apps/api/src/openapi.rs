use utoipa::OpenApi;

/// Aggregated API documentation for the lendhub core service.
///
/// Each domain crate documents its own router; they are nested here under
/// the paths the router assembly uses.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "lendhub API",
        description = "Peer-to-peer item sharing: users, items, bookings and item requests"
    ),
    nest(
        (path = "/api/users", api = domain_users::handlers::ApiDoc),
        (path = "/api/items", api = domain_items::handlers::ApiDoc),
        (path = "/api/bookings", api = domain_bookings::handlers::ApiDoc),
        (path = "/api/requests", api = domain_requests::handlers::ApiDoc),
    )
)]
pub struct ApiDoc;
