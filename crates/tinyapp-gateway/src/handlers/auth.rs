use super::session_user;
use crate::error::Result;
use crate::model::{CredentialsForm, PageView};
use crate::state::AppState;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use tower_cookies::Cookies;
use tracing::debug;

/// `GET /`: logged-in users land on their links, everyone else on login.
pub async fn root_handler(State(state): State<AppState>, cookies: Cookies) -> Result<Redirect> {
    match session_user(&state, &cookies).await? {
        Some(_) => Ok(Redirect::to("/urls")),
        None => Ok(Redirect::to("/login")),
    }
}

async fn anonymous_page(state: &AppState, cookies: &Cookies) -> Result<Response> {
    match session_user(state, cookies).await? {
        Some(_) => Ok(Redirect::to("/urls").into_response()),
        None => Ok(Json(PageView { user: None }).into_response()),
    }
}

/// `GET /register`
pub async fn register_page_handler(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Response> {
    anonymous_page(&state, &cookies).await
}

/// `GET /login`
pub async fn login_page_handler(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Response> {
    anonymous_page(&state, &cookies).await
}

/// `POST /register`: creates the account and logs it in.
pub async fn register_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    let user = state.accounts.register(&form.email, &form.password).await?;
    state.session.start(&cookies, &user);
    Ok(Redirect::to("/urls"))
}

/// `POST /login`
pub async fn login_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    let user = state
        .accounts
        .authenticate(&form.email, &form.password)
        .await?;
    state.session.start(&cookies, &user);
    Ok(Redirect::to("/urls"))
}

/// `POST /logout`: always succeeds, with or without a session.
pub async fn logout_handler(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    if let Some(user) = state.session.current(&cookies) {
        debug!(user = %user, "user logged out");
    }
    state.session.end(&cookies);
    Redirect::to("/login")
}
