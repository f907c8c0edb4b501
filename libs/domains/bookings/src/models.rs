use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::Display;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Booking approval lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    /// Created, waiting for the owner's decision
    #[sea_orm(string_value = "waiting")]
    Waiting,
    /// Confirmed by the owner; terminal for the approval flow
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Declined by the owner
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Withdrawn by the booker before the owner decided
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

/// State filter for booking listings.
///
/// Matched exhaustively by the query layer; an unrecognized wire value
/// fails parsing instead of silently defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, ToSchema)]
#[strum(serialize_all = "UPPERCASE")]
pub enum StateFilter {
    All,
    /// Bookings already over (`end` before the query time)
    Past,
    /// Bookings in progress (`start` before and `end` after the query time)
    Current,
    /// Bookings yet to start (`start` after the query time)
    Future,
    /// Status filter: waiting for the owner's decision
    Waiting,
    /// Status filter: declined by the owner
    Rejected,
}

/// Wire value that does not name a state filter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown state: {0}")]
pub struct UnknownState(pub String);

impl FromStr for StateFilter {
    type Err = UnknownState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(StateFilter::All),
            "PAST" => Ok(StateFilter::Past),
            "CURRENT" => Ok(StateFilter::Current),
            "FUTURE" => Ok(StateFilter::Future),
            "WAITING" => Ok(StateFilter::Waiting),
            "REJECTED" => Ok(StateFilter::Rejected),
            _ => Err(UnknownState(s.to_string())),
        }
    }
}

/// Ordering policy for booking listings, passed explicitly into each query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOrdering {
    /// Newest start first (the HTTP layer's ordering)
    StartDesc,
    /// Oldest start first
    StartAsc,
}

/// Booker summary embedded in booking responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
}

/// Item summary embedded in booking responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemRef {
    pub id: Uuid,
    pub name: String,
}

/// A reservation of an item for a time window
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
    pub item: ItemRef,
    pub booker: UserRef,
    /// Owner of the booked item; used for authorization, not serialized
    #[serde(skip_serializing)]
    pub item_owner_id: Uuid,
}

/// Insert payload for a new booking
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub item_id: Uuid,
    pub booker_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: BookingStatus,
}

/// DTO for creating a booking
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub item_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_filter_parses_known_values() {
        assert_eq!("ALL".parse::<StateFilter>().unwrap(), StateFilter::All);
        assert_eq!("past".parse::<StateFilter>().unwrap(), StateFilter::Past);
        assert_eq!(
            "Current".parse::<StateFilter>().unwrap(),
            StateFilter::Current
        );
        assert_eq!(
            "FUTURE".parse::<StateFilter>().unwrap(),
            StateFilter::Future
        );
        assert_eq!(
            "waiting".parse::<StateFilter>().unwrap(),
            StateFilter::Waiting
        );
        assert_eq!(
            "REJECTED".parse::<StateFilter>().unwrap(),
            StateFilter::Rejected
        );
    }

    #[test]
    fn test_state_filter_rejects_unknown_values() {
        let err = "UNSUPPORTED_STATUS".parse::<StateFilter>().unwrap_err();
        assert_eq!(err, UnknownState("UNSUPPORTED_STATUS".to_string()));

        // CANCELED is a booking status but not a listing filter
        assert!("CANCELED".parse::<StateFilter>().is_err());
    }

    #[test]
    fn test_booking_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Waiting).unwrap();
        assert_eq!(json, "\"waiting\"");
    }

    #[test]
    fn test_item_owner_id_is_not_serialized() {
        let booking = Booking {
            id: Uuid::now_v7(),
            start: Utc::now(),
            end: Utc::now(),
            status: BookingStatus::Waiting,
            item: ItemRef {
                id: Uuid::now_v7(),
                name: "Drill".to_string(),
            },
            booker: UserRef {
                id: Uuid::now_v7(),
                name: "Anna".to_string(),
            },
            item_owner_id: Uuid::now_v7(),
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert!(json.get("item_owner_id").is_none());
        assert_eq!(json["item"]["name"], "Drill");
    }
}
