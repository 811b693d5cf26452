use super::{ApiError, api_base_url, execute};
use crate::types::{AuthUser, Session};
use serde::{Deserialize, Serialize};

/// Client for the auth endpoints
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

// The two response shapes the backend uses: sign-up nests the user object,
// sign-in ships the same fields flattened at the top level.
#[derive(Deserialize)]
struct NestedUserShape {
    access_token: String,
    user: AuthUser,
}

#[derive(Deserialize)]
struct FlatUserShape {
    access_token: String,
    user_id: i64,
    email: String,
}

impl AuthClient {
    pub fn new() -> Self {
        Self::with_base_url(api_base_url())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = format!("{}/api/v1/auth/signin", self.base_url);
        let body = execute(
            self.client
                .post(&url)
                .json(&CredentialsRequest { email, password }),
        )
        .await?;
        parse_session(&body)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = format!("{}/api/v1/auth/signup", self.base_url);
        let body = execute(
            self.client
                .post(&url)
                .json(&CredentialsRequest { email, password }),
        )
        .await?;
        parse_session(&body)
    }
}

impl Default for AuthClient {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_session(body: &str) -> Result<Session, ApiError> {
    // Try the nested shape first
    if let Ok(parsed) = serde_json::from_str::<NestedUserShape>(body) {
        return Ok(Session {
            user: parsed.user,
            token: parsed.access_token,
        });
    }

    // Fall back to the flat shape
    let parsed: FlatUserShape = serde_json::from_str(body)?;
    Ok(Session {
        user: AuthUser {
            id: parsed.user_id,
            email: parsed.email,
            name: None,
        },
        token: parsed.access_token,
    })
}
