//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers shared by the lendhub
//! Axum services.
//!
//! ## Modules
//!
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON,
//!   caller-identity header)
//! - **[`pagination`]**: Validated offset/size page parameters
//! - **[`http`]**: HTTP middleware (security headers)
//! - **[`server`]**: Router assembly, health checks, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod pagination;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{SharerId, UuidPath, ValidatedJson, SHARER_USER_ID_HEADER};

// Re-export pagination types
pub use pagination::{Page, PageError, PageRequest};

// Re-export HTTP middleware
pub use http::security_headers;

// Re-export server helpers
pub use server::{
    create_app, create_production_app, create_router, health_router, run_health_checks,
    shutdown_signal, HealthCheckFuture, HealthResponse,
};
