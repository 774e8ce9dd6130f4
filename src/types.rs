//! Common types used throughout reddit-things
//!
//! Shared type aliases and the constants that describe the upstream API's
//! usage policy.

use std::collections::HashMap;
use std::time::Duration;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// API Policy
// ============================================================================

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Minimum spacing between two requests, process-wide
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(2000);

/// Items requested per listing page
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Identifying user agent sent with every request unless overridden
pub fn default_user_agent() -> String {
    format!(
        "reddit-things/{} (by /u/reddit-things-maintainer)",
        env!("CARGO_PKG_VERSION")
    )
}
