use super::{parse_alias, session_user};
use crate::error::Result;
use crate::model::{PageView, UrlForm, UrlIndexView, UrlShowView, UrlView, UserView};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use tinyapp_shortener::ShortenerError;
use tower_cookies::Cookies;

/// `GET /urls`: the requester's own links.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Json<UrlIndexView>> {
    let user = session_user(&state, &cookies)
        .await?
        .ok_or(ShortenerError::Unauthorized)?;
    let records = state.shortener.list_for_user(Some(&user.id)).await?;
    Ok(Json(UrlIndexView::new(&user, records, &state.base_url)))
}

/// `GET /urls/new`: anonymous visitors are sent to the login page.
pub async fn new_url_page_handler(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Response> {
    match session_user(&state, &cookies).await? {
        Some(user) => Ok(Json(PageView {
            user: Some(UserView::from(&user)),
        })
        .into_response()),
        None => Ok(Redirect::to("/login").into_response()),
    }
}

/// `POST /urls`: shortens `longURL` and shows the new link.
pub async fn create_url_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<UrlForm>,
) -> Result<Redirect> {
    let session = state.session.current(&cookies);
    let record = state
        .shortener
        .shorten(&form.long_url, session.as_ref())
        .await?;
    Ok(Redirect::to(&format!("/urls/{}", record.alias)))
}

/// `GET /urls/{alias}`: owner only.
pub async fn show_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Json<UrlShowView>> {
    let alias = parse_alias(short_code)?;
    let user = session_user(&state, &cookies).await?;
    let record = state
        .shortener
        .show(&alias, user.as_ref().map(|user| &user.id))
        .await?;

    Ok(Json(UrlShowView {
        user: user.as_ref().map(UserView::from),
        url: UrlView::from_record(&record, &state.base_url),
    }))
}

/// `POST /urls/{alias}`: repoints the alias at `longURL`. Owner only.
pub async fn update_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<UrlForm>,
) -> Result<Redirect> {
    let alias = parse_alias(short_code)?;
    let session = state.session.current(&cookies);
    state
        .shortener
        .update(&alias, &form.long_url, session.as_ref())
        .await?;
    Ok(Redirect::to("/urls"))
}

/// `POST /urls/{alias}/delete`: owner only.
pub async fn delete_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Redirect> {
    let alias = parse_alias(short_code)?;
    let session = state.session.current(&cookies);
    state.shortener.delete(&alias, session.as_ref()).await?;
    Ok(Redirect::to("/urls"))
}
