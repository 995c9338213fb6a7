use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// Fresh identifier for a locally created record.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Creation timestamp in the RFC 3339 form stored under `createdAt`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
