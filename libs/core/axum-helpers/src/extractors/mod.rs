//! Custom extractors for common request patterns.

mod sharer_id;
mod uuid_path;
mod validated_json;

pub use sharer_id::{SharerId, SHARER_USER_ID_HEADER};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
