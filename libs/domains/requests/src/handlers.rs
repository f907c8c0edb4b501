use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    PageRequest, SharerId, UuidPath, ValidatedJson,
};
use domain_users::UserRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::RequestResult;
use crate::models::{CreateItemRequest, ItemRequestResponse, RequestedItem};
use crate::repository::{ItemRequestRepository, RequestItemLookup};
use crate::service::ItemRequestService;

/// OpenAPI documentation for the Item Requests API
#[derive(OpenApi)]
#[openapi(
    paths(add_request, list_own_requests, list_other_requests, get_request),
    components(
        schemas(CreateItemRequest, ItemRequestResponse, RequestedItem),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Item Requests", description = "Wanted-item request endpoints")
    )
)]
pub struct ApiDoc;

/// Create the item-requests router with all HTTP endpoints
pub fn router<R, U, L>(service: ItemRequestService<R, U, L>) -> Router
where
    R: ItemRequestRepository + 'static,
    U: UserRepository + 'static,
    L: RequestItemLookup + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_own_requests).post(add_request))
        .route("/all", get(list_other_requests))
        .route("/{id}", get(get_request))
        .with_state(shared_service)
}

/// Post a new item request
#[utoipa::path(
    post,
    path = "",
    tag = "Item Requests",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Request created successfully", body = ItemRequestResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_request<R, U, L>(
    State(service): State<Arc<ItemRequestService<R, U, L>>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateItemRequest>,
) -> RequestResult<impl IntoResponse>
where
    R: ItemRequestRepository,
    U: UserRepository,
    L: RequestItemLookup,
{
    let response = service.add_request(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// List the caller's own requests, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Item Requests",
    responses(
        (status = 200, description = "Caller's requests", body = Vec<ItemRequestResponse>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_own_requests<R, U, L>(
    State(service): State<Arc<ItemRequestService<R, U, L>>>,
    SharerId(user_id): SharerId,
) -> RequestResult<Json<Vec<ItemRequestResponse>>>
where
    R: ItemRequestRepository,
    U: UserRepository,
    L: RequestItemLookup,
{
    let responses = service.list_own(user_id).await?;
    Ok(Json(responses))
}

/// List other users' requests, newest first, paged
#[utoipa::path(
    get,
    path = "/all",
    tag = "Item Requests",
    params(PageRequest),
    responses(
        (status = 200, description = "Other users' requests", body = Vec<ItemRequestResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_other_requests<R, U, L>(
    State(service): State<Arc<ItemRequestService<R, U, L>>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageRequest>,
) -> RequestResult<Json<Vec<ItemRequestResponse>>>
where
    R: ItemRequestRepository,
    U: UserRepository,
    L: RequestItemLookup,
{
    let responses = service.list_others(user_id, page).await?;
    Ok(Json(responses))
}

/// Fetch one request with its fulfilling items
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Item Requests",
    params(
        ("id" = Uuid, Path, description = "Item request ID")
    ),
    responses(
        (status = 200, description = "Request found", body = ItemRequestResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_request<R, U, L>(
    State(service): State<Arc<ItemRequestService<R, U, L>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> RequestResult<Json<ItemRequestResponse>>
where
    R: ItemRequestRepository,
    U: UserRepository,
    L: RequestItemLookup,
{
    let response = service.get_request(user_id, id).await?;
    Ok(Json(response))
}
