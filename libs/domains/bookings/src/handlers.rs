use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    PageRequest, SharerId, UuidPath, ValidatedJson,
};
use domain_items::ItemRepository;
use domain_users::UserRepository;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingStatus, CreateBooking, ItemRef, StateFilter, UserRef};
use crate::repository::BookingRepository;
use crate::service::BookingService;

/// OpenAPI documentation for the Bookings API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_booking,
        get_booking,
        list_bookings,
        list_owner_bookings,
        set_approval,
        cancel_booking,
    ),
    components(
        schemas(Booking, CreateBooking, BookingStatus, ItemRef, UserRef),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Bookings", description = "Booking lifecycle endpoints")
    )
)]
pub struct ApiDoc;

/// Query parameters for booking listings
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    /// One of ALL, PAST, CURRENT, FUTURE, WAITING, REJECTED
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "axum_helpers::pagination::default_size")]
    pub size: i64,
}

fn default_state() -> String {
    "ALL".to_string()
}

impl BookingListQuery {
    fn page(&self) -> PageRequest {
        PageRequest::new(self.from, self.size)
    }
}

/// Query parameter carrying the owner's decision
#[derive(Debug, Deserialize)]
pub struct ApprovalQuery {
    pub approved: bool,
}

/// Create the bookings router with all HTTP endpoints
pub fn router<B, I, U>(service: BookingService<B, I, U>) -> Router
where
    B: BookingRepository + 'static,
    I: ItemRepository + 'static,
    U: UserRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/owner", get(list_owner_bookings))
        .route("/{id}", get(get_booking).patch(set_approval))
        .route("/{id}/cancel", patch(cancel_booking))
        .with_state(shared_service)
}

/// Book an item for a time window
#[utoipa::path(
    post,
    path = "",
    tag = "Bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created successfully", body = Booking),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_booking<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateBooking>,
) -> BookingResult<impl IntoResponse>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let booking = service.create_booking(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Fetch a booking; visible to its booker and the item's owner
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking found", body = Booking),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_booking<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> BookingResult<Json<Booking>>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let booking = service.get_booking(user_id, id).await?;
    Ok(Json(booking))
}

/// List the caller's bookings, narrowed by state, newest start first
#[utoipa::path(
    get,
    path = "",
    tag = "Bookings",
    params(
        ("state" = Option<String>, Query, description = "ALL, PAST, CURRENT, FUTURE, WAITING or REJECTED"),
        PageRequest
    ),
    responses(
        (status = 200, description = "Caller's bookings", body = Vec<Booking>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_bookings<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(user_id): SharerId,
    Query(query): Query<BookingListQuery>,
) -> BookingResult<Json<Vec<Booking>>>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let filter: StateFilter = query.state.parse().map_err(BookingError::from)?;
    let bookings = service.list_for_booker(user_id, filter, query.page()).await?;
    Ok(Json(bookings))
}

/// List bookings placed against the caller's items
#[utoipa::path(
    get,
    path = "/owner",
    tag = "Bookings",
    params(
        ("state" = Option<String>, Query, description = "ALL, PAST, CURRENT, FUTURE, WAITING or REJECTED"),
        PageRequest
    ),
    responses(
        (status = 200, description = "Bookings on the caller's items", body = Vec<Booking>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_owner_bookings<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(user_id): SharerId,
    Query(query): Query<BookingListQuery>,
) -> BookingResult<Json<Vec<Booking>>>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let filter: StateFilter = query.state.parse().map_err(BookingError::from)?;
    let bookings = service.list_for_owner(user_id, filter, query.page()).await?;
    Ok(Json(bookings))
}

/// Approve or reject a booking; owner only
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID"),
        ("approved" = bool, Query, description = "true approves, false rejects")
    ),
    responses(
        (status = 200, description = "Booking updated", body = Booking),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn set_approval<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    Query(query): Query<ApprovalQuery>,
) -> BookingResult<Json<Booking>>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let booking = service.set_approval(user_id, id, query.approved).await?;
    Ok(Json(booking))
}

/// Cancel a waiting booking; booker only
#[utoipa::path(
    patch,
    path = "/{id}/cancel",
    tag = "Bookings",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking canceled", body = Booking),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn cancel_booking<B, I, U>(
    State(service): State<Arc<BookingService<B, I, U>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> BookingResult<Json<Booking>>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    let booking = service.cancel_booking(user_id, id).await?;
    Ok(Json(booking))
}
