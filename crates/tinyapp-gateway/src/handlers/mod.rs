mod auth;
mod health;
mod redirect;
mod url;

pub use auth::{
    login_handler, login_page_handler, logout_handler, register_handler, register_page_handler,
    root_handler,
};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use url::{
    create_url_handler, delete_url_handler, list_urls_handler, new_url_page_handler,
    show_url_handler, update_url_handler,
};

use crate::error::Result;
use crate::state::AppState;
use tinyapp_core::{Alias, UserRecord};
use tinyapp_shortener::ShortenerError;
use tower_cookies::Cookies;

/// A path segment that cannot be an alias names no stored record.
fn parse_alias(raw: String) -> Result<Alias> {
    Alias::new(raw.as_str()).map_err(|_| ShortenerError::AliasNotFound(raw).into())
}

/// Resolves the session to an existing account.
async fn session_user(state: &AppState, cookies: &Cookies) -> Result<Option<UserRecord>> {
    let session = state.session.current(cookies);
    Ok(state.accounts.current_user(session.as_ref()).await?)
}
