//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "GosuCatcher";

/// Directory name used under the platform data/config directories.
pub const APP_DIR_NAME: &str = "GosuCatcher";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// REST API path prefix.
pub const API_PREFIX: &str = "/api/v1";

/// Database schema version.
pub const DB_SCHEMA_VERSION: i32 = 1;

/// Minimum description length for an expert's response estimate.
pub const MIN_ESTIMATE_DESCRIPTION_CHARS: usize = 6;

/// Minimum description length for categories.
pub const MIN_ITEM_DESCRIPTION_CHARS: usize = 6;

/// Minimum review body length.
pub const MIN_REVIEW_CONTENT_CHARS: usize = 10;

/// Review ratings are whole stars in this range.
pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Member password length bounds.
pub const MIN_PASSWORD_CHARS: usize = 8;
pub const MAX_PASSWORD_CHARS: usize = 20;

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Default event bus capacity.
pub const EVENT_BUS_CAPACITY: usize = 256;
