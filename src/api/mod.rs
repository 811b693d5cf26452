//! API module for TodoHub
//!
//! Thin HTTP clients over the TodoHub backend. Each client owns its own
//! `reqwest::Client` and speaks plain JSON.
//!
//! - `auth` - sign-in / sign-up
//! - `tasks` - task CRUD, behind the `TaskApi` trait so views can be
//!   exercised against an in-memory implementation
//! - `chat` - the assistant endpoint

pub mod auth;
pub mod chat;
pub mod tasks;

pub use auth::AuthClient;
pub use chat::ChatClient;
pub use tasks::{InMemoryTaskApi, TaskApi, TaskHttpClient};

use std::env;

/// Common error type for all backend calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: Unable to reach the server. Please check your connection.")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error! Status: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("No authentication token available")]
    MissingToken,

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// Base URL of the backend, overridable for dev setups
pub fn api_base_url() -> String {
    env::var("TODOHUB_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Send a request and return the response body, mapping transport failures
/// and non-2xx statuses to `ApiError`
pub(crate) async fn execute(request: reqwest::RequestBuilder) -> Result<String, ApiError> {
    let response = request.send().await.map_err(ApiError::Network)?;
    let status = response.status();
    let body = response.text().await.map_err(ApiError::Network)?;

    if !status.is_success() {
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }

    Ok(body)
}
