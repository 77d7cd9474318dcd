use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::{ApiError, ValidationError},
    protocol::{SignupRequest, SignupResponse},
};
use thiserror::Error;
use tracing::debug;

use crate::config::ClientSettings;

/// Server acknowledgement of a created account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupAccepted {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("signup transport failure: {0}")]
    Transport(String),
    #[error("signup rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl SignupError {
    pub fn transport<E: std::fmt::Display>(err: E) -> Self {
        Self::Transport(err.to_string())
    }
}

#[async_trait]
pub trait SignupService: Send + Sync {
    async fn submit(&self, request: &SignupRequest) -> Result<SignupAccepted, SignupError>;
}

pub struct HttpSignupService {
    http: Client,
    endpoint: String,
}

impl HttpSignupService {
    pub fn new(settings: &ClientSettings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .context("failed to build signup http client")?;
        Ok(Self {
            http,
            endpoint: settings.signup_endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SignupService for HttpSignupService {
    async fn submit(&self, request: &SignupRequest) -> Result<SignupAccepted, SignupError> {
        debug!(endpoint = %self.endpoint, "posting signup");
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(SignupError::transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(SignupError::transport)?;
        debug!(endpoint = %self.endpoint, status = status.as_u16(), "signup response received");

        if !status.is_success() {
            // A failure status is authoritative even when the body is unreadable.
            let message = decode_body(&body)
                .ok()
                .and_then(|value| ApiError::from_body(&value).message);
            return Err(SignupError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        // Any JSON shape counts as accepted; only a non-JSON body is a transport failure.
        let value = decode_body(&body).map_err(SignupError::transport)?;
        Ok(SignupAccepted {
            message: SignupResponse::from_body(&value).message,
        })
    }
}

/// An empty body decodes as `null`.
fn decode_body(body: &[u8]) -> serde_json::Result<serde_json::Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_slice(body)
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
