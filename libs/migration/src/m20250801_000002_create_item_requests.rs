use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ItemRequests::Table)
                    .if_not_exists()
                    .col(pk_uuid(ItemRequests::Id))
                    .col(text(ItemRequests::Description))
                    .col(uuid(ItemRequests::RequesterId))
                    .col(
                        timestamp_with_time_zone(ItemRequests::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_requests_requester")
                            .from(ItemRequests::Table, ItemRequests::RequesterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_item_requests_requester")
                    .table(ItemRequests::Table)
                    .col(ItemRequests::RequesterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ItemRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ItemRequests {
    Table,
    Id,
    Description,
    RequesterId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
