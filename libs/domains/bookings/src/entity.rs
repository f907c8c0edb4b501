use crate::models::{BookingStatus, NewBooking};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM entity for the bookings table.
///
/// `start`/`end` are stored as `start_date`/`end_date`; END is reserved in
/// SQL and the raw listing queries read better without quoting.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub item_id: Uuid,
    pub booker_id: Uuid,
    pub status: BookingStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<NewBooking> for ActiveModel {
    fn from(input: NewBooking) -> Self {
        ActiveModel {
            id: Set(Uuid::now_v7()),
            start_date: Set(input.start.into()),
            end_date: Set(input.end.into()),
            item_id: Set(input.item_id),
            booker_id: Set(input.booker_id),
            status: Set(input.status),
        }
    }
}
