use async_trait::async_trait;
use axum_helpers::Page;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::RequestResult,
    models::ItemRequest,
    repository::ItemRequestRepository,
};

/// PostgreSQL implementation of ItemRequestRepository using SeaORM
#[derive(Clone)]
pub struct PgItemRequestRepository {
    db: DatabaseConnection,
}

impl PgItemRequestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRequestRepository for PgItemRequestRepository {
    async fn create(&self, request: ItemRequest) -> RequestResult<ItemRequest> {
        let active: entity::ActiveModel = request.into();
        let model = active.insert(&self.db).await?;

        tracing::info!(request_id = %model.id, requester_id = %model.requester_id, "Created item request");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> RequestResult<Option<ItemRequest>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn list_by_requester(&self, requester_id: Uuid) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequesterId.eq(requester_id))
            .order_by_desc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn list_others(&self, user_id: Uuid, page: Page) -> RequestResult<Vec<ItemRequest>> {
        let models = entity::Entity::find()
            .filter(entity::Column::RequesterId.ne(user_id))
            .order_by_desc(entity::Column::CreatedAt)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
