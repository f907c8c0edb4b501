use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the comments table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            item_id: model.item_id,
            author_id: model.author_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::Comment> for ActiveModel {
    fn from(comment: crate::models::Comment) -> Self {
        ActiveModel {
            id: Set(comment.id),
            text: Set(comment.text),
            item_id: Set(comment.item_id),
            author_id: Set(comment.author_id),
            created_at: Set(comment.created_at.into()),
        }
    }
}
