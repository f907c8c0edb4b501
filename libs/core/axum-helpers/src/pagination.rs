//! Validated offset/size pagination parameters.
//!
//! Listing endpoints take `from` (row offset) and `size` (page size) query
//! parameters. Out-of-range values are reported as validation errors rather
//! than silently clamped, so the fields deserialize as signed integers and
//! validation happens explicitly in the service layer.

use serde::Deserialize;
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

/// Raw pagination parameters as they arrive on the wire.
///
/// Defaults: `from = 0`, `size = 10`. Call [`PageRequest::validate`] to turn
/// them into a usable [`Page`]; services do this so the bounds are enforced
/// even for callers that bypass the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
pub struct PageRequest {
    /// Index of the first result to return (0-based)
    #[serde(default)]
    pub from: i64,
    /// Number of results to return
    #[serde(default = "default_size")]
    pub size: i64,
}

/// Serde default for the `size` parameter; public so query structs that
/// combine paging with other parameters can reuse it.
pub fn default_size() -> i64 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            from: 0,
            size: default_size(),
        }
    }
}

/// Pagination bounds violation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page size must be at least 1, got {0}")]
    SizeTooSmall(i64),

    #[error("page offset cannot be negative, got {0}")]
    NegativeOffset(i64),
}

/// Validated pagination window, ready for SQL OFFSET/LIMIT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(from: i64, size: i64) -> Self {
        Self { from, size }
    }

    /// Check the bounds: `size >= 1` and `from >= 0`.
    pub fn validate(self) -> Result<Page, PageError> {
        if self.size < 1 {
            return Err(PageError::SizeTooSmall(self.size));
        }
        if self.from < 0 {
            return Err(PageError::NegativeOffset(self.from));
        }
        Ok(Page {
            offset: self.from as u64,
            limit: self.size as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.from, 0);
        assert_eq!(page.size, 10);
    }

    #[test]
    fn test_valid_page() {
        let page = PageRequest::new(20, 5).validate().unwrap();
        assert_eq!(page.offset, 20);
        assert_eq!(page.limit, 5);
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = PageRequest::new(0, 0).validate().unwrap_err();
        assert_eq!(err, PageError::SizeTooSmall(0));
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = PageRequest::new(0, -3).validate().unwrap_err();
        assert_eq!(err, PageError::SizeTooSmall(-3));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let err = PageRequest::new(-1, 10).validate().unwrap_err();
        assert_eq!(err, PageError::NegativeOffset(-1));
    }

    #[test]
    fn test_query_string_deserialization_uses_defaults() {
        let page: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(page, PageRequest::default());
    }
}
