use axum_helpers::PageRequest;
use chrono::{DateTime, Utc};
use domain_requests::ItemRequestRepository;
use domain_users::UserRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{
    BookingRef, Comment, CommentView, CreateComment, CreateItem, Item, ItemBookingSlice,
    ItemResponse, UpdateItem,
};
use crate::repository::{CommentRepository, ItemBookingLookup, ItemRepository};

/// Service layer for the item catalog
pub struct ItemService<I, C, U, Q, B>
where
    I: ItemRepository,
    C: CommentRepository,
    U: UserRepository,
    Q: ItemRequestRepository,
    B: ItemBookingLookup,
{
    items: Arc<I>,
    comments: Arc<C>,
    users: Arc<U>,
    requests: Arc<Q>,
    bookings: Arc<B>,
}

impl<I, C, U, Q, B> ItemService<I, C, U, Q, B>
where
    I: ItemRepository,
    C: CommentRepository,
    U: UserRepository,
    Q: ItemRequestRepository,
    B: ItemBookingLookup,
{
    pub fn new(items: I, comments: C, users: Arc<U>, requests: Arc<Q>, bookings: Arc<B>) -> Self {
        Self {
            items: Arc::new(items),
            comments: Arc::new(comments),
            users,
            requests,
            bookings,
        }
    }

    /// List a new item for the owner.
    ///
    /// The owner must exist; when the listing fulfills a request, the
    /// request must exist too.
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, owner_id: Uuid, input: CreateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        if !self.users.exists(owner_id).await.map_err(ItemError::from)? {
            return Err(ItemError::UserNotFound(owner_id));
        }

        if let Some(request_id) = input.request_id {
            self.requests
                .get_by_id(request_id)
                .await
                .map_err(ItemError::from)?
                .ok_or(ItemError::RequestNotFound(request_id))?;
        }

        self.items.create(Item::new(input, owner_id)).await
    }

    /// Owner-only partial update of name, description and availability.
    ///
    /// Looked up by (id, owner): a non-owner caller gets not-found.
    #[instrument(skip(self, input))]
    pub async fn update_item(
        &self,
        owner_id: Uuid,
        item_id: Uuid,
        input: UpdateItem,
    ) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let mut item = self
            .items
            .get_by_id_and_owner(item_id, owner_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))?;

        item.apply_update(input);
        self.items.update(item).await
    }

    /// Fetch an item. The owner additionally sees the item's last and next
    /// bookings; everyone sees the comments.
    #[instrument(skip(self))]
    pub async fn get_item(&self, viewer_id: Uuid, item_id: Uuid) -> ItemResult<ItemResponse> {
        let item = self
            .items
            .get_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))?;

        let for_owner = item.owner_id == viewer_id;
        self.build_response(item, for_owner, Utc::now()).await
    }

    /// The owner's items with booking neighbours and comments, ordered by id
    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        owner_id: Uuid,
        page: PageRequest,
    ) -> ItemResult<Vec<ItemResponse>> {
        let page = page.validate()?;
        let items = self.items.list_by_owner(owner_id, page).await?;

        let now = Utc::now();
        let mut responses = Vec::with_capacity(items.len());
        for item in items {
            responses.push(self.build_response(item, true, now).await?);
        }
        Ok(responses)
    }

    /// Case-insensitive substring search over available items.
    ///
    /// Blank text short-circuits to an empty result without touching the
    /// store.
    #[instrument(skip(self))]
    pub async fn search_items(&self, text: &str, page: PageRequest) -> ItemResult<Vec<Item>> {
        let page = page.validate()?;

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.items.search(text, page).await
    }

    /// Leave a comment on an item.
    ///
    /// Allowed only for users holding an approved booking on the item that
    /// has already ended.
    #[instrument(skip(self, input))]
    pub async fn add_comment(
        &self,
        author_id: Uuid,
        item_id: Uuid,
        input: CreateComment,
    ) -> ItemResult<CommentView> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let author = self
            .users
            .get_by_id(author_id)
            .await
            .map_err(ItemError::from)?
            .ok_or(ItemError::UserNotFound(author_id))?;

        self.items
            .get_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))?;

        let bookings = self.bookings.bookings_for_item(item_id).await?;
        if !has_finished_approved_booking(&bookings, author_id, Utc::now()) {
            return Err(ItemError::CommentNotAllowed { user_id: author_id, item_id });
        }

        let comment = self
            .comments
            .create(Comment::new(input.text, item_id, author_id))
            .await?;

        Ok(CommentView {
            id: comment.id,
            text: comment.text,
            author_name: author.name,
            created_at: comment.created_at,
        })
    }

    async fn build_response(
        &self,
        item: Item,
        for_owner: bool,
        now: DateTime<Utc>,
    ) -> ItemResult<ItemResponse> {
        let comments = self.comments.list_for_item(item.id).await?;
        let item_id = item.id;
        let mut response = ItemResponse::from_item(item, comments);

        if for_owner {
            let bookings = self.bookings.bookings_for_item(item_id).await?;
            let (last, next) = resolve_neighbour_bookings(&bookings, now);
            response.last_booking = last;
            response.next_booking = next;
        }

        Ok(response)
    }
}

impl<I, C, U, Q, B> Clone for ItemService<I, C, U, Q, B>
where
    I: ItemRepository,
    C: CommentRepository,
    U: UserRepository,
    Q: ItemRequestRepository,
    B: ItemBookingLookup,
{
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            comments: Arc::clone(&self.comments),
            users: Arc::clone(&self.users),
            requests: Arc::clone(&self.requests),
            bookings: Arc::clone(&self.bookings),
        }
    }
}

/// Pick the item's neighbouring bookings around `now`: the most recent
/// approved booking that has started, and the nearest booking yet to start.
fn resolve_neighbour_bookings(
    bookings: &[ItemBookingSlice],
    now: DateTime<Utc>,
) -> (Option<BookingRef>, Option<BookingRef>) {
    let last = bookings
        .iter()
        .filter(|b| b.approved && b.start <= now)
        .max_by_key(|b| b.start)
        .map(|b| BookingRef {
            id: b.id,
            booker_id: b.booker_id,
        });

    let next = bookings
        .iter()
        .filter(|b| b.start > now)
        .min_by_key(|b| b.start)
        .map(|b| BookingRef {
            id: b.id,
            booker_id: b.booker_id,
        });

    (last, next)
}

/// A user may comment only after an approved booking of theirs has ended.
fn has_finished_approved_booking(
    bookings: &[ItemBookingSlice],
    author_id: Uuid,
    now: DateTime<Utc>,
) -> bool {
    bookings
        .iter()
        .any(|b| b.booker_id == author_id && b.approved && b.end < now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockCommentRepository, MockItemBookingLookup, MockItemRepository};
    use chrono::Duration;
    use domain_requests::{ItemRequest, MockItemRequestRepository};
    use domain_users::{MockUserRepository, User};
    use mockall::predicate::eq;

    type TestService = ItemService<
        MockItemRepository,
        MockCommentRepository,
        MockUserRepository,
        MockItemRequestRepository,
        MockItemBookingLookup,
    >;

    fn service(
        items: MockItemRepository,
        comments: MockCommentRepository,
        users: MockUserRepository,
        requests: MockItemRequestRepository,
        bookings: MockItemBookingLookup,
    ) -> TestService {
        ItemService::new(
            items,
            comments,
            Arc::new(users),
            Arc::new(requests),
            Arc::new(bookings),
        )
    }

    fn slice(
        booker_id: Uuid,
        start_offset_hours: i64,
        end_offset_hours: i64,
        approved: bool,
        now: DateTime<Utc>,
    ) -> ItemBookingSlice {
        ItemBookingSlice {
            id: Uuid::now_v7(),
            booker_id,
            start: now + Duration::hours(start_offset_hours),
            end: now + Duration::hours(end_offset_hours),
            approved,
        }
    }

    fn create_input() -> CreateItem {
        CreateItem {
            name: "Cordless drill".to_string(),
            description: "18V, two batteries".to_string(),
            available: true,
            request_id: None,
        }
    }

    #[test]
    fn test_neighbours_pick_latest_past_and_earliest_future() {
        let now = Utc::now();
        let booker = Uuid::now_v7();

        let older = slice(booker, -48, -40, true, now);
        let recent = slice(booker, -2, -1, true, now);
        let soon = slice(booker, 3, 5, false, now);
        let later = slice(booker, 24, 30, true, now);

        let (last, next) =
            resolve_neighbour_bookings(&[older, recent, soon, later], now);

        assert_eq!(last.unwrap().id, recent.id);
        // The nearest future booking counts regardless of approval
        assert_eq!(next.unwrap().id, soon.id);
    }

    #[test]
    fn test_neighbours_ignore_unapproved_for_last() {
        let now = Utc::now();
        let booker = Uuid::now_v7();

        let pending = slice(booker, -2, -1, false, now);
        let approved = slice(booker, -10, -9, true, now);

        let (last, next) = resolve_neighbour_bookings(&[pending, approved], now);

        assert_eq!(last.unwrap().id, approved.id);
        assert!(next.is_none());
    }

    #[test]
    fn test_comment_eligibility_requires_finished_approved_booking() {
        let now = Utc::now();
        let author = Uuid::now_v7();
        let someone_else = Uuid::now_v7();

        let finished_by_other = slice(someone_else, -10, -5, true, now);
        let ongoing = slice(author, -2, 2, true, now);
        let finished_rejected = slice(author, -10, -5, false, now);

        assert!(!has_finished_approved_booking(
            &[finished_by_other, ongoing, finished_rejected],
            author,
            now
        ));

        let finished = slice(author, -10, -5, true, now);
        assert!(has_finished_approved_booking(&[finished], author, now));
    }

    #[tokio::test]
    async fn test_create_item_requires_existing_owner() {
        let owner = Uuid::now_v7();

        let mut users = MockUserRepository::new();
        users.expect_exists().with(eq(owner)).returning(|_| Ok(false));

        let mut items = MockItemRepository::new();
        items.expect_create().never();

        let svc = service(
            items,
            MockCommentRepository::new(),
            users,
            MockItemRequestRepository::new(),
            MockItemBookingLookup::new(),
        );

        let result = svc.create_item(owner, create_input()).await;
        assert!(matches!(result, Err(ItemError::UserNotFound(id)) if id == owner));
    }

    #[tokio::test]
    async fn test_create_item_requires_existing_request() {
        let owner = Uuid::now_v7();
        let request_id = Uuid::now_v7();

        let mut users = MockUserRepository::new();
        users.expect_exists().with(eq(owner)).returning(|_| Ok(true));

        let mut requests = MockItemRequestRepository::new();
        requests
            .expect_get_by_id()
            .with(eq(request_id))
            .returning(|_| Ok(None));

        let mut items = MockItemRepository::new();
        items.expect_create().never();

        let svc = service(
            items,
            MockCommentRepository::new(),
            users,
            requests,
            MockItemBookingLookup::new(),
        );

        let mut input = create_input();
        input.request_id = Some(request_id);

        let result = svc.create_item(owner, input).await;
        assert!(matches!(result, Err(ItemError::RequestNotFound(id)) if id == request_id));
    }

    #[tokio::test]
    async fn test_create_item_links_request() {
        let owner = Uuid::now_v7();
        let requester = Uuid::now_v7();
        let request = ItemRequest::new("Need a drill".to_string(), requester);
        let request_id = request.id;

        let mut users = MockUserRepository::new();
        users.expect_exists().with(eq(owner)).returning(|_| Ok(true));

        let mut requests = MockItemRequestRepository::new();
        let stored = request.clone();
        requests
            .expect_get_by_id()
            .with(eq(request_id))
            .returning(move |_| Ok(Some(stored.clone())));

        let mut items = MockItemRepository::new();
        items.expect_create().returning(|item| Ok(item));

        let svc = service(
            items,
            MockCommentRepository::new(),
            users,
            requests,
            MockItemBookingLookup::new(),
        );

        let mut input = create_input();
        input.request_id = Some(request_id);

        let created = svc.create_item(owner, input).await.unwrap();
        assert_eq!(created.owner_id, owner);
        assert_eq!(created.request_id, Some(request_id));
    }

    #[tokio::test]
    async fn test_update_item_by_non_owner_is_not_found() {
        let owner = Uuid::now_v7();
        let item_id = Uuid::now_v7();

        let mut items = MockItemRepository::new();
        items
            .expect_get_by_id_and_owner()
            .with(eq(item_id), eq(owner))
            .returning(|_, _| Ok(None));
        items.expect_update().never();

        let svc = service(
            items,
            MockCommentRepository::new(),
            MockUserRepository::new(),
            MockItemRequestRepository::new(),
            MockItemBookingLookup::new(),
        );

        let result = svc
            .update_item(owner, item_id, UpdateItem::default())
            .await;
        assert!(matches!(result, Err(ItemError::NotFound(id)) if id == item_id));
    }

    #[tokio::test]
    async fn test_update_item_applies_partial_patch() {
        let owner = Uuid::now_v7();
        let item = Item::new(create_input(), owner);
        let item_id = item.id;

        let mut items = MockItemRepository::new();
        let stored = item.clone();
        items
            .expect_get_by_id_and_owner()
            .with(eq(item_id), eq(owner))
            .returning(move |_, _| Ok(Some(stored.clone())));
        items
            .expect_update()
            .withf(|i| !i.available && i.name == "Cordless drill")
            .returning(|i| Ok(i));

        let svc = service(
            items,
            MockCommentRepository::new(),
            MockUserRepository::new(),
            MockItemRequestRepository::new(),
            MockItemBookingLookup::new(),
        );

        let updated = svc
            .update_item(
                owner,
                item_id,
                UpdateItem {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!updated.available);
        assert_eq!(updated.name, "Cordless drill");
    }

    #[tokio::test]
    async fn test_get_item_owner_sees_neighbour_bookings() {
        let owner = Uuid::now_v7();
        let booker = Uuid::now_v7();
        let item = Item::new(create_input(), owner);
        let item_id = item.id;

        let now = Utc::now();
        let past = slice(booker, -5, -4, true, now);
        let future = slice(booker, 4, 5, true, now);

        let mut items = MockItemRepository::new();
        let stored = item.clone();
        items
            .expect_get_by_id()
            .with(eq(item_id))
            .returning(move |_| Ok(Some(stored.clone())));

        let mut comments = MockCommentRepository::new();
        comments
            .expect_list_for_item()
            .with(eq(item_id))
            .returning(|_| Ok(Vec::new()));

        let mut bookings = MockItemBookingLookup::new();
        bookings
            .expect_bookings_for_item()
            .with(eq(item_id))
            .returning(move |_| Ok(vec![past, future]));

        let svc = service(
            items,
            comments,
            MockUserRepository::new(),
            MockItemRequestRepository::new(),
            bookings,
        );

        let response = svc.get_item(owner, item_id).await.unwrap();
        assert_eq!(response.last_booking.unwrap().id, past.id);
        assert_eq!(response.next_booking.unwrap().id, future.id);
    }

    #[tokio::test]
    async fn test_get_item_stranger_sees_no_bookings() {
        let owner = Uuid::now_v7();
        let stranger = Uuid::now_v7();
        let item = Item::new(create_input(), owner);
        let item_id = item.id;

        let mut items = MockItemRepository::new();
        let stored = item.clone();
        items
            .expect_get_by_id()
            .with(eq(item_id))
            .returning(move |_| Ok(Some(stored.clone())));

        let mut comments = MockCommentRepository::new();
        comments
            .expect_list_for_item()
            .with(eq(item_id))
            .returning(|_| Ok(Vec::new()));

        let mut bookings = MockItemBookingLookup::new();
        bookings.expect_bookings_for_item().never();

        let svc = service(
            items,
            comments,
            MockUserRepository::new(),
            MockItemRequestRepository::new(),
            bookings,
        );

        let response = svc.get_item(stranger, item_id).await.unwrap();
        assert!(response.last_booking.is_none());
        assert!(response.next_booking.is_none());
    }

    #[tokio::test]
    async fn test_search_blank_text_returns_empty() {
        let mut items = MockItemRepository::new();
        items.expect_search().never();

        let svc = service(
            items,
            MockCommentRepository::new(),
            MockUserRepository::new(),
            MockItemRequestRepository::new(),
            MockItemBookingLookup::new(),
        );

        let found = svc.search_items("   ", PageRequest::default()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_search_rejects_bad_page() {
        let mut items = MockItemRepository::new();
        items.expect_search().never();

        let svc = service(
            items,
            MockCommentRepository::new(),
            MockUserRepository::new(),
            MockItemRequestRepository::new(),
            MockItemBookingLookup::new(),
        );

        let result = svc.search_items("drill", PageRequest::new(0, 0)).await;
        assert!(matches!(result, Err(ItemError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_comment_without_finished_booking_is_rejected() {
        let author = User::new("Boris".to_string(), "boris@example.com".to_string());
        let author_id = author.id;
        let owner = Uuid::now_v7();
        let item = Item::new(create_input(), owner);
        let item_id = item.id;

        let mut users = MockUserRepository::new();
        let stored_author = author.clone();
        users
            .expect_get_by_id()
            .with(eq(author_id))
            .returning(move |_| Ok(Some(stored_author.clone())));

        let mut items = MockItemRepository::new();
        let stored_item = item.clone();
        items
            .expect_get_by_id()
            .with(eq(item_id))
            .returning(move |_| Ok(Some(stored_item.clone())));

        let now = Utc::now();
        let ongoing = slice(author_id, -1, 3, true, now);

        let mut bookings = MockItemBookingLookup::new();
        bookings
            .expect_bookings_for_item()
            .with(eq(item_id))
            .returning(move |_| Ok(vec![ongoing]));

        let mut comments = MockCommentRepository::new();
        comments.expect_create().never();

        let svc = service(
            items,
            comments,
            users,
            MockItemRequestRepository::new(),
            bookings,
        );

        let result = svc
            .add_comment(
                author_id,
                item_id,
                CreateComment {
                    text: "Great drill".to_string(),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(ItemError::CommentNotAllowed { user_id, .. }) if user_id == author_id
        ));
    }

    #[tokio::test]
    async fn test_add_comment_carries_author_name() {
        let author = User::new("Boris".to_string(), "boris@example.com".to_string());
        let author_id = author.id;
        let owner = Uuid::now_v7();
        let item = Item::new(create_input(), owner);
        let item_id = item.id;

        let mut users = MockUserRepository::new();
        let stored_author = author.clone();
        users
            .expect_get_by_id()
            .with(eq(author_id))
            .returning(move |_| Ok(Some(stored_author.clone())));

        let mut items = MockItemRepository::new();
        let stored_item = item.clone();
        items
            .expect_get_by_id()
            .with(eq(item_id))
            .returning(move |_| Ok(Some(stored_item.clone())));

        let now = Utc::now();
        let finished = slice(author_id, -10, -5, true, now);

        let mut bookings = MockItemBookingLookup::new();
        bookings
            .expect_bookings_for_item()
            .with(eq(item_id))
            .returning(move |_| Ok(vec![finished]));

        let mut comments = MockCommentRepository::new();
        comments.expect_create().returning(|c| Ok(c));

        let svc = service(
            items,
            comments,
            users,
            MockItemRequestRepository::new(),
            bookings,
        );

        let view = svc
            .add_comment(
                author_id,
                item_id,
                CreateComment {
                    text: "Great drill".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(view.author_name, "Boris");
        assert_eq!(view.text, "Great drill");
    }
}
