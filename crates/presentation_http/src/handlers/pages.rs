//! Session-protected pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::{error::ApiError, session::SignedIn, state::AppState};

/// Map dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    user: SignedIn,
) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.dashboard(&user.session.display_name)?))
}

/// Profile page
///
/// A session whose account no longer exists is ended.
pub async fn profile(State(state): State<AppState>, user: SignedIn) -> Result<Response, ApiError> {
    let Some(account) = state.account_service.find(&user.session.user_id).await? else {
        warn!(user_id = %user.session.user_id, "Session refers to a missing account");
        state.sessions.remove(&user.token);
        return Ok(Redirect::to("/login").into_response());
    };

    let message = format!(
        "Profile management for {} ({}), member since {}",
        account.display_name(),
        account.email(),
        account.created_at().format("%Y-%m-%d")
    );
    let html = state.pages.simple_page("Profile", &message, None)?;
    Ok(Html(html).into_response())
}

/// Settings placeholder
pub async fn settings(
    State(state): State<AppState>,
    _user: SignedIn,
) -> Result<Html<String>, ApiError> {
    Ok(Html(state.pages.simple_page(
        "Settings",
        "Settings page (placeholder)",
        None,
    )?))
}
