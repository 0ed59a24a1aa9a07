/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a fresh UUID v4 string for use as a resource ID.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate an opaque cancellation token.
///
/// Tokens are UUID v4 — unguessable, issued once per reservation and
/// never regenerated.
pub fn new_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
