//! Type-safe error codes for API responses.
//!
//! Single source of truth for the error codes carried in error bodies. Each
//! code has a string identifier for clients, an integer for monitoring, and
//! a default human-readable message.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid UUID format in path or query parameter
    InvalidUuid,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state
    Conflict,

    // Server errors (1000s)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Database errors (2000-2999)
    /// Database query returned no results
    DatabaseNotFound,

    /// Database connection or query error
    DatabaseError,

    /// Database connection pool timed out
    DatabasePoolTimeout,

    // Upstream errors (3000s)
    /// Upstream service rejected or failed the forwarded request
    BadGateway,
}

impl ErrorCode {
    /// String identifier for programmatic handling by clients
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidUuid => "INVALID_UUID",
            ErrorCode::JsonExtraction => "JSON_EXTRACTION",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::DatabaseNotFound => "DATABASE_NOT_FOUND",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::DatabasePoolTimeout => "DATABASE_POOL_TIMEOUT",
            ErrorCode::BadGateway => "BAD_GATEWAY",
        }
    }

    /// Integer code for logging and monitoring
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidUuid => 1002,
            ErrorCode::JsonExtraction => 1003,
            ErrorCode::NotFound => 1004,
            ErrorCode::Conflict => 1008,
            ErrorCode::InternalError => 1005,
            ErrorCode::ServiceUnavailable => 1006,
            ErrorCode::DatabaseNotFound => 2001,
            ErrorCode::DatabaseError => 2003,
            ErrorCode::DatabasePoolTimeout => 2013,
            ErrorCode::BadGateway => 3001,
        }
    }

    /// Default human-readable message
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::InvalidUuid => "Invalid UUID format",
            ErrorCode::JsonExtraction => "Invalid JSON in request body",
            ErrorCode::NotFound => "Requested resource was not found",
            ErrorCode::Conflict => "Request conflicts with current resource state",
            ErrorCode::InternalError => "An unexpected error occurred",
            ErrorCode::ServiceUnavailable => "Service is temporarily unavailable",
            ErrorCode::DatabaseNotFound => "Database query returned no results",
            ErrorCode::DatabaseError => "A database error occurred",
            ErrorCode::DatabasePoolTimeout => "Database connection pool timed out",
            ErrorCode::BadGateway => "Upstream service request failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_round_trip() {
        let code = ErrorCode::ValidationError;
        assert_eq!(code.as_str(), "VALIDATION_ERROR");
        assert_eq!(code.code(), 1001);
        assert_eq!(code.default_message(), "Request validation failed");
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "\"NOT_FOUND\"");
    }
}
