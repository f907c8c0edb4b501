use axum_helpers::PageRequest;
use domain_users::UserRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateItemRequest, ItemRequest, ItemRequestResponse};
use crate::repository::{ItemRequestRepository, RequestItemLookup};

/// Service layer for item-request business logic
pub struct ItemRequestService<R, U, L>
where
    R: ItemRequestRepository,
    U: UserRepository,
    L: RequestItemLookup,
{
    repository: Arc<R>,
    users: Arc<U>,
    items: Arc<L>,
}

impl<R, U, L> ItemRequestService<R, U, L>
where
    R: ItemRequestRepository,
    U: UserRepository,
    L: RequestItemLookup,
{
    pub fn new(repository: R, users: Arc<U>, items: Arc<L>) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            items,
        }
    }

    /// Post a new item request
    #[instrument(skip(self, input))]
    pub async fn add_request(
        &self,
        requester_id: Uuid,
        input: CreateItemRequest,
    ) -> RequestResult<ItemRequestResponse> {
        input
            .validate()
            .map_err(|e| RequestError::Validation(e.to_string()))?;

        self.check_user(requester_id).await?;

        let request = self
            .repository
            .create(ItemRequest::new(input.description, requester_id))
            .await?;

        // A freshly created request cannot have fulfilling items yet
        Ok(ItemRequestResponse::from_request(request, Vec::new()))
    }

    /// The caller's own requests, newest first, unpaged
    #[instrument(skip(self))]
    pub async fn list_own(&self, requester_id: Uuid) -> RequestResult<Vec<ItemRequestResponse>> {
        self.check_user(requester_id).await?;

        let requests = self.repository.list_by_requester(requester_id).await?;
        self.enrich_all(requests).await
    }

    /// Everyone else's requests, newest first, paged
    #[instrument(skip(self))]
    pub async fn list_others(
        &self,
        caller_id: Uuid,
        page: PageRequest,
    ) -> RequestResult<Vec<ItemRequestResponse>> {
        self.check_user(caller_id).await?;
        let page = page.validate()?;

        let requests = self.repository.list_others(caller_id, page).await?;
        self.enrich_all(requests).await
    }

    /// Fetch a single request with its fulfilling items
    #[instrument(skip(self))]
    pub async fn get_request(
        &self,
        caller_id: Uuid,
        request_id: Uuid,
    ) -> RequestResult<ItemRequestResponse> {
        self.check_user(caller_id).await?;

        let request = self
            .repository
            .get_by_id(request_id)
            .await?
            .ok_or(RequestError::NotFound(request_id))?;

        self.enrich(request).await
    }

    async fn enrich(&self, request: ItemRequest) -> RequestResult<ItemRequestResponse> {
        let items = self.items.items_for_request(request.id).await?;
        Ok(ItemRequestResponse::from_request(request, items))
    }

    async fn enrich_all(
        &self,
        requests: Vec<ItemRequest>,
    ) -> RequestResult<Vec<ItemRequestResponse>> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.enrich(request).await?);
        }
        Ok(responses)
    }

    async fn check_user(&self, user_id: Uuid) -> RequestResult<()> {
        if !self.users.exists(user_id).await.map_err(RequestError::from)? {
            return Err(RequestError::UserNotFound(user_id));
        }
        Ok(())
    }
}

impl<R, U, L> Clone for ItemRequestService<R, U, L>
where
    R: ItemRequestRepository,
    U: UserRepository,
    L: RequestItemLookup,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            users: Arc::clone(&self.users),
            items: Arc::clone(&self.items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestedItem;
    use crate::repository::{MockItemRequestRepository, MockRequestItemLookup};
    use domain_users::MockUserRepository;
    use mockall::predicate::eq;

    fn service(
        repo: MockItemRequestRepository,
        users: MockUserRepository,
        items: MockRequestItemLookup,
    ) -> ItemRequestService<MockItemRequestRepository, MockUserRepository, MockRequestItemLookup>
    {
        ItemRequestService::new(repo, Arc::new(users), Arc::new(items))
    }

    fn known_user(id: Uuid) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_exists().with(eq(id)).returning(|_| Ok(true));
        users
    }

    #[tokio::test]
    async fn test_add_request_requires_existing_user() {
        let requester = Uuid::now_v7();

        let mut users = MockUserRepository::new();
        users
            .expect_exists()
            .with(eq(requester))
            .returning(|_| Ok(false));

        let mut repo = MockItemRequestRepository::new();
        repo.expect_create().never();

        let svc = service(repo, users, MockRequestItemLookup::new());
        let result = svc
            .add_request(
                requester,
                CreateItemRequest {
                    description: "Need a cordless drill".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(RequestError::UserNotFound(id)) if id == requester));
    }

    #[tokio::test]
    async fn test_add_request_returns_empty_items() {
        let requester = Uuid::now_v7();

        let mut repo = MockItemRequestRepository::new();
        repo.expect_create().returning(|r| Ok(r));

        let svc = service(repo, known_user(requester), MockRequestItemLookup::new());
        let response = svc
            .add_request(
                requester,
                CreateItemRequest {
                    description: "Need a cordless drill".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.requester_id, requester);
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_add_request_rejects_blank_description() {
        let requester = Uuid::now_v7();

        let mut repo = MockItemRequestRepository::new();
        repo.expect_create().never();

        let svc = service(repo, MockUserRepository::new(), MockRequestItemLookup::new());
        let result = svc
            .add_request(
                requester,
                CreateItemRequest {
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(RequestError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_own_enriches_with_items() {
        let requester = Uuid::now_v7();
        let request = ItemRequest::new("Ladder for a week".to_string(), requester);
        let request_id = request.id;

        let mut repo = MockItemRequestRepository::new();
        let listed = request.clone();
        repo.expect_list_by_requester()
            .with(eq(requester))
            .returning(move |_| Ok(vec![listed.clone()]));

        let mut items = MockRequestItemLookup::new();
        items
            .expect_items_for_request()
            .with(eq(request_id))
            .returning(move |id| {
                Ok(vec![RequestedItem {
                    id: Uuid::now_v7(),
                    name: "Aluminium ladder".to_string(),
                    description: "3m, foldable".to_string(),
                    available: true,
                    request_id: id,
                }])
            });

        let svc = service(repo, known_user(requester), items);
        let responses = svc.list_own(requester).await.unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].items.len(), 1);
        assert_eq!(responses[0].items[0].request_id, request_id);
    }

    #[tokio::test]
    async fn test_list_others_validates_page() {
        let caller = Uuid::now_v7();

        let mut repo = MockItemRequestRepository::new();
        repo.expect_list_others().never();

        let svc = service(repo, known_user(caller), MockRequestItemLookup::new());
        let result = svc.list_others(caller, PageRequest::new(-1, 10)).await;

        assert!(matches!(result, Err(RequestError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_request_not_found() {
        let caller = Uuid::now_v7();
        let request_id = Uuid::now_v7();

        let mut repo = MockItemRequestRepository::new();
        repo.expect_get_by_id()
            .with(eq(request_id))
            .returning(|_| Ok(None));

        let svc = service(repo, known_user(caller), MockRequestItemLookup::new());
        let result = svc.get_request(caller, request_id).await;

        assert!(matches!(result, Err(RequestError::NotFound(id)) if id == request_id));
    }
}
