//! Login, signup and logout
//!
//! Form posts answer with a redirect to `/` on success. Failures render a
//! short HTML page with a link back to the form.

use application::ApplicationError;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use infrastructure::{AuthForm, PageLink};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{
    error::ApiError,
    session::{Session, removal_cookie, session_cookie},
    state::AppState,
};

/// Login form fields
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Signup form fields
#[derive(Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn failure_page(
    state: &AppState,
    status: StatusCode,
    title: &str,
    message: &str,
    retry: &str,
) -> Result<Response, ApiError> {
    let html = state.pages.simple_page(
        title,
        message,
        Some(PageLink::new(retry, "Try again")),
    )?;
    Ok((status, Html(html)).into_response())
}

fn sign_in(state: &AppState, jar: CookieJar, session: Session) -> (CookieJar, Redirect) {
    let token = state.sessions.create(session);
    let cookie = session_cookie(&state.config.server.session_cookie_name, token);
    (jar.add(cookie), Redirect::to("/"))
}

pub async fn login_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.auth_form(AuthForm::Login)?))
}

pub async fn signup_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.auth_form(AuthForm::Signup)?))
}

#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    match state.account_service.login(&form.email, &form.password).await {
        Ok(account) => {
            info!(user_id = %account.id(), "Signed in");
            Ok(sign_in(&state, jar, Session::from(&account)).into_response())
        },
        Err(ApplicationError::NotAuthorized(msg)) => {
            warn!("Login rejected");
            failure_page(&state, StatusCode::UNAUTHORIZED, "Login", &format!("{msg}."), "/login")
        },
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip_all, fields(email = %form.email))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<Response, ApiError> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return failure_page(
            &state,
            StatusCode::BAD_REQUEST,
            "Sign Up",
            "Missing fields.",
            "/signup",
        );
    }

    let name = form.name.as_deref().filter(|n| !n.trim().is_empty());
    match state
        .account_service
        .signup(&form.email, &form.password, name)
        .await
    {
        Ok(account) => Ok(sign_in(&state, jar, Session::from(&account)).into_response()),
        Err(ApplicationError::AlreadyExists(_)) => failure_page(
            &state,
            StatusCode::CONFLICT,
            "Sign Up",
            "Unable to create account (maybe email exists).",
            "/signup",
        ),
        Err(e @ (ApplicationError::Domain(_) | ApplicationError::InvalidInput(_))) => {
            failure_page(
                &state,
                StatusCode::BAD_REQUEST,
                "Sign Up",
                &e.to_string(),
                "/signup",
            )
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let name = &state.config.server.session_cookie_name;
    if let Some(cookie) = jar.get(name) {
        if let Some(session) = state.sessions.remove(cookie.value()) {
            info!(user_id = %session.user_id, "Signed out");
        }
    }
    (jar.remove(removal_cookie(name)), Redirect::to("/"))
}
