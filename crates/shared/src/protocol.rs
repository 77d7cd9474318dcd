use serde::Serialize;

pub const SIGNUP_PATH: &str = "/signup";

/// Body of `POST /signup`. Fields are expected to be trimmed and the email
/// lower-cased before this is built.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupResponse {
    pub message: Option<String>,
}

impl SignupResponse {
    /// Reads whatever JSON the server sent. Only a non-empty string `message`
    /// is kept; any other shape yields no message.
    pub fn from_body(body: &serde_json::Value) -> Self {
        Self {
            message: message_field(body),
        }
    }
}

pub(crate) fn message_field(body: &serde_json::Value) -> Option<String> {
    body.get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
