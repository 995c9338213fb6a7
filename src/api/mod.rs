//! Client side of the task backend's REST API.
//!
//! Commands talk to a [`TaskBackend`]; production code uses [`HttpBackend`].

pub mod auth;
#[cfg(test)]
pub mod fake;
pub mod http;

pub use auth::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
pub use http::HttpBackend;

use crate::data::{Label, NewLabel, NewTask, Task, TaskUpdate};
use crate::error::ApiResult;
use serde_json::Value;

/// Operations the remote backend exposes. Every task and label call carries
/// the bearer token from the stored session.
pub trait TaskBackend {
    fn signup(&self, request: &SignupRequest) -> ApiResult<SignupResponse>;
    fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    fn list_tasks(&self, token: &str) -> ApiResult<Vec<Task>>;
    /// Returns the new task's id when the backend reports one.
    fn create_task(&self, token: &str, task: &NewTask) -> ApiResult<Option<String>>;
    fn update_task(&self, token: &str, task_id: &str, update: &TaskUpdate) -> ApiResult<()>;
    fn delete_task(&self, token: &str, task_id: &str) -> ApiResult<()>;

    fn list_labels(&self, token: &str) -> ApiResult<Vec<Label>>;
    fn create_label(&self, token: &str, label: &NewLabel) -> ApiResult<()>;
    fn assign_labels(&self, token: &str, task_id: &str, labels: &[String]) -> ApiResult<()>;
}

/// Human-readable message from an error body: `detail` (string or any JSON),
/// then `message`, then a bare JSON string, else `fallback`.
pub fn error_detail(body: &str, fallback: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return fallback.to_string();
    };
    match &value {
        Value::String(s) if !s.is_empty() => s.clone(),
        Value::Object(map) => match (map.get("detail"), map.get("message")) {
            (Some(Value::String(s)), _) => s.clone(),
            (Some(other), _) if !other.is_null() => other.to_string(),
            (_, Some(Value::String(s))) => s.clone(),
            _ => fallback.to_string(),
        },
        _ => fallback.to_string(),
    }
}
