use async_trait::async_trait;
use axum_helpers::Page;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    QueryFilter, Statement,
};
use uuid::Uuid;

use domain_items::{ItemBookingLookup, ItemBookingSlice, ItemError, ItemResult};

use crate::{
    entity,
    error::BookingResult,
    models::{Booking, BookingOrdering, BookingStatus, ItemRef, NewBooking, StateFilter, UserRef},
    repository::BookingRepository,
};

/// Booking row joined with its item and booker
#[derive(Debug, FromQueryResult)]
struct BookingRow {
    id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    status: BookingStatus,
    item_id: Uuid,
    item_name: String,
    item_owner_id: Uuid,
    booker_id: Uuid,
    booker_name: String,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            start: row.start_date,
            end: row.end_date,
            status: row.status,
            item: ItemRef {
                id: row.item_id,
                name: row.item_name,
            },
            booker: UserRef {
                id: row.booker_id,
                name: row.booker_name,
            },
            item_owner_id: row.item_owner_id,
        }
    }
}

const BOOKING_SELECT: &str = "\
SELECT b.id, b.start_date, b.end_date, b.status, \
b.item_id, i.name AS item_name, i.owner_id AS item_owner_id, \
b.booker_id, u.name AS booker_name \
FROM bookings b \
JOIN items i ON i.id = b.item_id \
JOIN users u ON u.id = b.booker_id";

/// Which side of the booking the listing is scoped to
#[derive(Clone, Copy)]
enum ListScope {
    Booker,
    Owner,
}

impl ListScope {
    fn column(self) -> &'static str {
        match self {
            ListScope::Booker => "b.booker_id",
            ListScope::Owner => "i.owner_id",
        }
    }
}

fn order_clause(order: BookingOrdering) -> &'static str {
    match order {
        BookingOrdering::StartDesc => "ORDER BY b.start_date DESC",
        BookingOrdering::StartAsc => "ORDER BY b.start_date ASC",
    }
}

/// Build the listing statement for one scope/filter combination.
///
/// The state filter is matched exhaustively; status literals are inlined
/// (they come from the enum, not from user input) so every variant binds a
/// fixed, fully-referenced parameter list.
fn build_list_statement(
    scope: ListScope,
    user_id: Uuid,
    filter: StateFilter,
    now: DateTime<Utc>,
    page: Page,
    order: BookingOrdering,
) -> Statement {
    let scope_col = scope.column();
    let order_by = order_clause(order);
    let limit = page.limit as i64;
    let offset = page.offset as i64;

    let (sql, values): (String, Vec<sea_orm::Value>) = match filter {
        StateFilter::All => (
            format!("{BOOKING_SELECT} WHERE {scope_col} = $1 {order_by} LIMIT $2 OFFSET $3"),
            vec![user_id.into(), limit.into(), offset.into()],
        ),
        StateFilter::Past => (
            format!(
                "{BOOKING_SELECT} WHERE {scope_col} = $1 AND b.end_date < $2 {order_by} LIMIT $3 OFFSET $4"
            ),
            vec![user_id.into(), now.into(), limit.into(), offset.into()],
        ),
        StateFilter::Current => (
            format!(
                "{BOOKING_SELECT} WHERE {scope_col} = $1 AND b.start_date < $2 AND b.end_date > $3 {order_by} LIMIT $4 OFFSET $5"
            ),
            vec![
                user_id.into(),
                now.into(),
                now.into(),
                limit.into(),
                offset.into(),
            ],
        ),
        StateFilter::Future => (
            format!(
                "{BOOKING_SELECT} WHERE {scope_col} = $1 AND b.start_date > $2 {order_by} LIMIT $3 OFFSET $4"
            ),
            vec![user_id.into(), now.into(), limit.into(), offset.into()],
        ),
        StateFilter::Waiting => (
            format!(
                "{BOOKING_SELECT} WHERE {scope_col} = $1 AND b.status = 'waiting' {order_by} LIMIT $2 OFFSET $3"
            ),
            vec![user_id.into(), limit.into(), offset.into()],
        ),
        StateFilter::Rejected => (
            format!(
                "{BOOKING_SELECT} WHERE {scope_col} = $1 AND b.status = 'rejected' {order_by} LIMIT $2 OFFSET $3"
            ),
            vec![user_id.into(), limit.into(), offset.into()],
        ),
    };

    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

/// PostgreSQL implementation of BookingRepository
#[derive(Clone)]
pub struct PgBookingRepository {
    db: DatabaseConnection,
}

impl PgBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            format!("{BOOKING_SELECT} WHERE b.id = $1"),
            [id.into()],
        );

        let row = BookingRow::find_by_statement(stmt).one(&self.db).await?;
        Ok(row.map(|r| r.into()))
    }

    async fn list(
        &self,
        scope: ListScope,
        user_id: Uuid,
        filter: StateFilter,
        now: DateTime<Utc>,
        page: Page,
        order: BookingOrdering,
    ) -> BookingResult<Vec<Booking>> {
        let stmt = build_list_statement(scope, user_id, filter, now, page, order);
        let rows = BookingRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// One conditional UPDATE; the guard and the write are a single
    /// statement, so racing transitions serialize in the store.
    async fn conditional_update(
        &self,
        id: Uuid,
        status: BookingStatus,
        guard: sea_orm::Condition,
    ) -> BookingResult<Option<Booking>> {
        let result = entity::Entity::update_many()
            .col_expr(entity::Column::Status, Expr::value(status))
            .filter(entity::Column::Id.eq(id))
            .filter(guard)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        tracing::info!(booking_id = %id, status = %status, "Booking status changed");
        self.fetch(id).await
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: NewBooking) -> BookingResult<Booking> {
        let active: entity::ActiveModel = booking.into();
        let model = active.insert(&self.db).await?;

        tracing::info!(booking_id = %model.id, item_id = %model.item_id, "Created booking");

        // Re-read through the join to pick up the item/booker summaries
        self.fetch(model.id)
            .await?
            .ok_or_else(|| crate::error::BookingError::Internal(
                format!("Booking {} vanished after insert", model.id),
            ))
    }

    async fn get(&self, id: Uuid) -> BookingResult<Option<Booking>> {
        self.fetch(id).await
    }

    async fn set_status_unless(
        &self,
        id: Uuid,
        status: BookingStatus,
        unless: BookingStatus,
    ) -> BookingResult<Option<Booking>> {
        let guard = sea_orm::Condition::all().add(entity::Column::Status.ne(unless));
        self.conditional_update(id, status, guard).await
    }

    async fn set_status_if_current(
        &self,
        id: Uuid,
        status: BookingStatus,
        expected: BookingStatus,
    ) -> BookingResult<Option<Booking>> {
        let guard = sea_orm::Condition::all().add(entity::Column::Status.eq(expected));
        self.conditional_update(id, status, guard).await
    }

    async fn list_for_booker(
        &self,
        booker_id: Uuid,
        filter: StateFilter,
        now: DateTime<Utc>,
        page: Page,
        order: BookingOrdering,
    ) -> BookingResult<Vec<Booking>> {
        self.list(ListScope::Booker, booker_id, filter, now, page, order)
            .await
    }

    async fn list_for_owner(
        &self,
        owner_id: Uuid,
        filter: StateFilter,
        now: DateTime<Utc>,
        page: Page,
        order: BookingOrdering,
    ) -> BookingResult<Vec<Booking>> {
        self.list(ListScope::Owner, owner_id, filter, now, page, order)
            .await
    }
}

/// The booking side of the item-view port: the slices an item view needs
/// about its bookings.
#[async_trait]
impl ItemBookingLookup for PgBookingRepository {
    async fn bookings_for_item(&self, item_id: Uuid) -> ItemResult<Vec<ItemBookingSlice>> {
        let models = entity::Entity::find()
            .filter(entity::Column::ItemId.eq(item_id))
            .all(&self.db)
            .await
            .map_err(|e| ItemError::Database(e.to_string()))?;

        Ok(models
            .into_iter()
            .map(|m| ItemBookingSlice {
                id: m.id,
                booker_id: m.booker_id,
                start: m.start_date.into(),
                end: m.end_date.into(),
                approved: m.status == BookingStatus::Approved,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        axum_helpers::PageRequest::default().validate().unwrap()
    }

    #[test]
    fn test_list_statement_all_binds_scope_and_window() {
        let stmt = build_list_statement(
            ListScope::Booker,
            Uuid::now_v7(),
            StateFilter::All,
            Utc::now(),
            page(),
            BookingOrdering::StartDesc,
        );

        assert!(stmt.sql.contains("WHERE b.booker_id = $1"));
        assert!(stmt.sql.contains("ORDER BY b.start_date DESC"));
        assert!(stmt.sql.contains("LIMIT $2 OFFSET $3"));
        assert_eq!(stmt.values.as_ref().unwrap().0.len(), 3);
    }

    #[test]
    fn test_list_statement_current_binds_now_twice() {
        let stmt = build_list_statement(
            ListScope::Owner,
            Uuid::now_v7(),
            StateFilter::Current,
            Utc::now(),
            page(),
            BookingOrdering::StartDesc,
        );

        assert!(stmt.sql.contains("WHERE i.owner_id = $1"));
        assert!(stmt.sql.contains("b.start_date < $2"));
        assert!(stmt.sql.contains("b.end_date > $3"));
        assert_eq!(stmt.values.as_ref().unwrap().0.len(), 5);
    }

    #[test]
    fn test_list_statement_status_filters_inline_literal() {
        let waiting = build_list_statement(
            ListScope::Booker,
            Uuid::now_v7(),
            StateFilter::Waiting,
            Utc::now(),
            page(),
            BookingOrdering::StartDesc,
        );
        assert!(waiting.sql.contains("b.status = 'waiting'"));
        assert_eq!(waiting.values.as_ref().unwrap().0.len(), 3);

        let rejected = build_list_statement(
            ListScope::Booker,
            Uuid::now_v7(),
            StateFilter::Rejected,
            Utc::now(),
            page(),
            BookingOrdering::StartAsc,
        );
        assert!(rejected.sql.contains("b.status = 'rejected'"));
        assert!(rejected.sql.contains("ORDER BY b.start_date ASC"));
    }

    #[test]
    fn test_list_statement_past_and_future_windows() {
        let past = build_list_statement(
            ListScope::Booker,
            Uuid::now_v7(),
            StateFilter::Past,
            Utc::now(),
            page(),
            BookingOrdering::StartDesc,
        );
        assert!(past.sql.contains("b.end_date < $2"));

        let future = build_list_statement(
            ListScope::Booker,
            Uuid::now_v7(),
            StateFilter::Future,
            Utc::now(),
            page(),
            BookingOrdering::StartDesc,
        );
        assert!(future.sql.contains("b.start_date > $2"));
    }

    #[tokio::test]
    async fn test_conditional_update_guard_blocks() {
        let db = sea_orm::MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PgBookingRepository::new(db);
        let result = repo
            .set_status_unless(Uuid::now_v7(), BookingStatus::Rejected, BookingStatus::Approved)
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
