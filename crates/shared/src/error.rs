use thiserror::Error;

/// Local form validation failures. `Display` is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your full name and email.")]
    MissingRequiredField,
    #[error("Please enter a valid email address.")]
    InvalidEmailFormat,
    #[error("Password must be at least 8 characters and include letters & numbers.")]
    WeakPassword,
}

/// Error body returned by the signup backend on a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    pub message: Option<String>,
}

impl ApiError {
    pub fn from_body(body: &serde_json::Value) -> Self {
        Self {
            message: crate::protocol::message_field(body),
        }
    }
}
