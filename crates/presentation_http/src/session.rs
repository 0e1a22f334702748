//! In-memory browser sessions
//!
//! A session maps a random token, stored in an HTTP-only cookie, to the
//! signed-in account. Sessions live until logout or process restart.

use std::collections::HashMap;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use domain::{Account, UserId};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Data kept for a signed-in browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub display_name: String,
}

impl From<&Account> for Session {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.id(),
            display_name: account.display_name().to_string(),
        }
    }
}

/// Token to session map shared by all requests
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a session and return its new token
    pub fn create(&self, session: Session) -> String {
        let token = Uuid::new_v4().to_string();
        debug!(user_id = %session.user_id, "Session created");
        self.sessions.write().insert(token.clone(), session);
        token
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.sessions.read().get(token).cloned()
    }

    /// Remove a session, returning it if it existed
    pub fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.write().remove(token)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

/// Build the session cookie for `token`
pub fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie value that removes the session cookie
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    Cookie::build(name.to_string()).path("/").build()
}

/// Extractor for pages that require a signed-in user
///
/// Requests without a valid session are redirected to `/login`.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub token: String,
    pub session: Session,
}

impl FromRequestParts<AppState> for SignedIn {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        jar.get(&state.config.server.session_cookie_name)
            .and_then(|cookie| {
                let token = cookie.value().to_string();
                state
                    .sessions
                    .get(&token)
                    .map(|session| Self { token, session })
            })
            .ok_or_else(|| Redirect::to("/login"))
    }
}
