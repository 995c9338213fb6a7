//! Typed errors for form validation and backend calls.
//!
//! Command code works in `anyhow::Result`; these enums are what it wraps.

use thiserror::Error;

/// A form submission was rejected before it reached the network or the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in the required field: {0}")]
    MissingField(&'static str),

    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Username must be at least 3 characters")]
    UsernameTooShort,

    #[error("Priority must be one of High, Medium, Low (got '{0}')")]
    InvalidPriority(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Progress must be between 0 and 100 (got {0})")]
    ProgressOutOfRange(u32),

    #[error("Unknown avatar '{0}'")]
    UnknownAvatar(String),

    #[error("Theme must be 'light' or 'dark' (got '{0}')")]
    InvalidTheme(String),

    #[error("Unknown goal category '{0}'")]
    InvalidCategory(String),
}

/// Failure talking to the task backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not logged in, run `perspectives login` first")]
    NotLoggedIn,

    #[error("{detail} (HTTP {status})")]
    Http { status: u16, detail: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        assert_eq!(
            ValidationError::MissingField("title").to_string(),
            "Please fill in the required field: title"
        );
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_http_error_includes_status_and_detail() {
        let err = ApiError::Http {
            status: 400,
            detail: "Email already registered".to_string(),
        };
        assert_eq!(err.to_string(), "Email already registered (HTTP 400)");
    }
}
