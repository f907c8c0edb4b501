use async_trait::async_trait;
use axum_helpers::Page;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbBackend, DbErr, EntityTrait,
    ExprTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect, Statement,
};
use uuid::Uuid;

use domain_requests::{RequestItemLookup, RequestResult, RequestedItem};

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{Comment, CommentView, Item},
    repository::{CommentRepository, ItemRepository},
};

/// PostgreSQL implementation of ItemRepository using SeaORM
#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, item: Item) -> ItemResult<Item> {
        let active: entity::item::ActiveModel = item.into();
        let model = active.insert(&self.db).await?;

        tracing::info!(item_id = %model.id, owner_id = %model.owner_id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<Option<Item>> {
        let model = entity::item::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|m| m.into()))
    }

    async fn get_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> ItemResult<Option<Item>> {
        let model = entity::item::Entity::find_by_id(id)
            .filter(entity::item::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await?;
        Ok(model.map(|m| m.into()))
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        let id = item.id;
        let active: entity::item::ActiveModel = item.into();

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ItemError::NotFound(id),
            other => ItemError::from(other),
        })?;

        tracing::info!(item_id = %id, "Updated item");
        Ok(model.into())
    }

    async fn list_by_owner(&self, owner_id: Uuid, page: Page) -> ItemResult<Vec<Item>> {
        let models = entity::item::Entity::find()
            .filter(entity::item::Column::OwnerId.eq(owner_id))
            .order_by_asc(entity::item::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn search(&self, text: &str, page: Page) -> ItemResult<Vec<Item>> {
        let pattern = format!("%{}%", text.to_lowercase());

        let models = entity::item::Entity::find()
            .filter(entity::item::Column::Available.eq(true))
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(entity::item::Column::Name)))
                            .like(pattern.as_str()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(entity::item::Column::Description)))
                            .like(pattern.as_str()),
                    ),
            )
            .order_by_asc(entity::item::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

/// The item catalog side of the request-enrichment port
#[async_trait]
impl RequestItemLookup for PgItemRepository {
    async fn items_for_request(&self, request_id: Uuid) -> RequestResult<Vec<RequestedItem>> {
        let models = entity::item::Entity::find()
            .filter(entity::item::Column::RequestId.eq(request_id))
            .order_by_asc(entity::item::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|m| RequestedItem {
                id: m.id,
                name: m.name,
                description: m.description,
                available: m.available,
                request_id,
            })
            .collect())
    }
}

/// Comment row joined with its author's display name
#[derive(Debug, FromQueryResult)]
struct CommentRow {
    id: Uuid,
    text: String,
    author_name: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CommentRow> for CommentView {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            author_name: row.author_name,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL implementation of CommentRepository using SeaORM
#[derive(Clone)]
pub struct PgCommentRepository {
    db: DatabaseConnection,
}

impl PgCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: Comment) -> ItemResult<Comment> {
        let active: entity::comment::ActiveModel = comment.into();
        let model = active.insert(&self.db).await?;

        tracing::info!(comment_id = %model.id, item_id = %model.item_id, "Created comment");
        Ok(model.into())
    }

    async fn list_for_item(&self, item_id: Uuid) -> ItemResult<Vec<CommentView>> {
        let sql = r#"
            SELECT c.id, c.text, u.name AS author_name, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.item_id = $1
            ORDER BY c.created_at DESC
        "#;

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [item_id.into()]);

        let rows = CommentRow::find_by_statement(stmt).all(&self.db).await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
