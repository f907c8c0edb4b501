use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    PageRequest, SharerId, UuidPath, ValidatedJson,
};
use domain_requests::ItemRequestRepository;
use domain_users::UserRepository;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ItemResult;
use crate::models::{
    BookingRef, CommentView, CreateComment, CreateItem, Item, ItemResponse, UpdateItem,
};
use crate::repository::{CommentRepository, ItemBookingLookup, ItemRepository};
use crate::service::ItemService;

/// OpenAPI documentation for the Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, search_items, add_comment),
    components(
        schemas(
            Item,
            CreateItem,
            UpdateItem,
            ItemResponse,
            BookingRef,
            CreateComment,
            CommentView
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Item catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Query parameters for item search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    #[serde(default)]
    pub from: i64,
    #[serde(default = "axum_helpers::pagination::default_size")]
    pub size: i64,
}

/// Create the items router with all HTTP endpoints
pub fn router<I, C, U, Q, B>(service: ItemService<I, C, U, Q, B>) -> Router
where
    I: ItemRepository + 'static,
    C: CommentRepository + 'static,
    U: UserRepository + 'static,
    Q: ItemRequestRepository + 'static,
    B: ItemBookingLookup + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).patch(update_item))
        .route("/{id}/comment", post(add_comment))
        .with_state(shared_service)
}

/// List the caller's items with booking neighbours and comments
#[utoipa::path(
    get,
    path = "",
    tag = "Items",
    params(PageRequest),
    responses(
        (status = 200, description = "Caller's items", body = Vec<ItemResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<I, C, U, Q, B>(
    State(service): State<Arc<ItemService<I, C, U, Q, B>>>,
    SharerId(user_id): SharerId,
    Query(page): Query<PageRequest>,
) -> ItemResult<Json<Vec<ItemResponse>>>
where
    I: ItemRepository,
    C: CommentRepository,
    U: UserRepository,
    Q: ItemRequestRepository,
    B: ItemBookingLookup,
{
    let items = service.list_items(user_id, page).await?;
    Ok(Json(items))
}

/// List a new item
#[utoipa::path(
    post,
    path = "",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<I, C, U, Q, B>(
    State(service): State<Arc<ItemService<I, C, U, Q, B>>>,
    SharerId(user_id): SharerId,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> ItemResult<impl IntoResponse>
where
    I: ItemRepository,
    C: CommentRepository,
    U: UserRepository,
    Q: ItemRequestRepository,
    B: ItemBookingLookup,
{
    let item = service.create_item(user_id, input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Search available items by substring
#[utoipa::path(
    get,
    path = "/search",
    tag = "Items",
    params(
        ("text" = String, Query, description = "Substring matched against name and description"),
        PageRequest
    ),
    responses(
        (status = 200, description = "Matching available items", body = Vec<Item>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items<I, C, U, Q, B>(
    State(service): State<Arc<ItemService<I, C, U, Q, B>>>,
    Query(query): Query<SearchQuery>,
) -> ItemResult<Json<Vec<Item>>>
where
    I: ItemRepository,
    C: CommentRepository,
    U: UserRepository,
    Q: ItemRequestRepository,
    B: ItemBookingLookup,
{
    let items = service
        .search_items(&query.text, PageRequest::new(query.from, query.size))
        .await?;
    Ok(Json(items))
}

/// Fetch an item; the owner additionally sees its booking neighbours
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<I, C, U, Q, B>(
    State(service): State<Arc<ItemService<I, C, U, Q, B>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
) -> ItemResult<Json<ItemResponse>>
where
    I: ItemRepository,
    C: CommentRepository,
    U: UserRepository,
    Q: ItemRequestRepository,
    B: ItemBookingLookup,
{
    let item = service.get_item(user_id, id).await?;
    Ok(Json(item))
}

/// Owner-only partial item update
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<I, C, U, Q, B>(
    State(service): State<Arc<ItemService<I, C, U, Q, B>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> ItemResult<Json<Item>>
where
    I: ItemRepository,
    C: CommentRepository,
    U: UserRepository,
    Q: ItemRequestRepository,
    B: ItemBookingLookup,
{
    let item = service.update_item(user_id, id, input).await?;
    Ok(Json(item))
}

/// Comment on an item after a finished approved booking
#[utoipa::path(
    post,
    path = "/{id}/comment",
    tag = "Items",
    params(
        ("id" = Uuid, Path, description = "Item ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 201, description = "Comment created successfully", body = CommentView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_comment<I, C, U, Q, B>(
    State(service): State<Arc<ItemService<I, C, U, Q, B>>>,
    SharerId(user_id): SharerId,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<CreateComment>,
) -> ItemResult<impl IntoResponse>
where
    I: ItemRepository,
    C: CommentRepository,
    U: UserRepository,
    Q: ItemRequestRepository,
    B: ItemBookingLookup,
{
    let comment = service.add_comment(user_id, id, input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
