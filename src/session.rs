//! Signed-in session state.
//!
//! The signal-backed [`SessionStore`] is what views consume; the free
//! functions underneath do the actual storage reads and writes and are
//! usable outside a UI scope.

use crate::api::AuthClient;
use crate::storage;
use crate::types::{AuthUser, Session};
use dioxus::prelude::*;

pub const SESSION_NAMESPACE: &str = "session";
const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "auth_token";

/// Session signals shared by the whole app. Created once in `App` and
/// passed down as a prop.
#[derive(Clone, Copy)]
pub struct SessionStore {
    user: Signal<Option<AuthUser>>,
    token: Signal<Option<String>>,
    restoring: Signal<bool>,
}

impl PartialEq for SessionStore {
    fn eq(&self, _: &Self) -> bool {
        false
    }
}

pub fn use_session_store() -> SessionStore {
    let store = SessionStore {
        user: use_signal(|| None),
        token: use_signal(|| None),
        restoring: use_signal(|| true),
    };

    use_effect(move || {
        spawn(async move {
            if let Some(session) = load_session() {
                store.install_in_memory(&session);
            }
            let mut restoring = store.restoring;
            restoring.set(false);
        });
    });

    store
}

impl SessionStore {
    pub fn user(&self) -> Option<AuthUser> {
        (self.user)()
    }

    pub fn token(&self) -> Option<String> {
        (self.token)()
    }

    pub fn restoring(&self) -> bool {
        (self.restoring)()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }

    /// Authenticate and remember the session. Returns whether it worked;
    /// failures are logged and leave the current state untouched.
    pub async fn sign_in(&self, email: &str, password: &str) -> bool {
        match AuthClient::new().sign_in(email, password).await {
            Ok(session) => {
                self.install(session);
                true
            }
            Err(err) => {
                tracing::warn!("sign-in failed: {}", err);
                false
            }
        }
    }

    /// Register a new account. A successful sign-up signs the user in.
    pub async fn sign_up(&self, email: &str, password: &str) -> bool {
        match AuthClient::new().sign_up(email, password).await {
            Ok(session) => {
                self.install(session);
                true
            }
            Err(err) => {
                tracing::warn!("sign-up failed: {}", err);
                false
            }
        }
    }

    pub fn sign_out(&self) {
        clear_session();
        let mut user = self.user;
        user.set(None);
        let mut token = self.token;
        token.set(None);
    }

    fn install(&self, session: Session) {
        if let Err(err) = persist_session(&session) {
            tracing::warn!("failed to persist session: {}", err);
        }
        self.install_in_memory(&session);
    }

    fn install_in_memory(&self, session: &Session) {
        let mut user = self.user;
        user.set(Some(session.user.clone()));
        let mut token = self.token;
        token.set(Some(session.token.clone()));
    }
}

/// Read the persisted session back, if one exists and still parses
pub fn load_session() -> Option<Session> {
    let user_json = storage::storage_get(SESSION_NAMESPACE, USER_KEY)?;
    let token = storage::storage_get(SESSION_NAMESPACE, TOKEN_KEY)?;

    match serde_json::from_str::<AuthUser>(&user_json) {
        Ok(user) => Some(Session { user, token }),
        Err(err) => {
            tracing::warn!("stored session is unreadable, treating as signed out: {}", err);
            None
        }
    }
}

pub fn persist_session(session: &Session) -> Result<(), String> {
    let user_json = serde_json::to_string(&session.user).map_err(|e| e.to_string())?;
    storage::storage_set(SESSION_NAMESPACE, USER_KEY, &user_json)?;
    storage::storage_set(SESSION_NAMESPACE, TOKEN_KEY, &session.token)
}

pub fn clear_session() {
    let _ = storage::storage_delete(SESSION_NAMESPACE, USER_KEY);
    let _ = storage::storage_delete(SESSION_NAMESPACE, TOKEN_KEY);
}

/// The persisted bearer token, used as a fallback when a caller has no
/// in-memory session at hand
pub fn stored_token() -> Option<String> {
    storage::storage_get(SESSION_NAMESPACE, TOKEN_KEY)
}
