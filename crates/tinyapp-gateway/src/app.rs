use axum::routing::{get, post};
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_url_handler, delete_url_handler, health_handler, list_urls_handler, login_handler,
    login_page_handler, logout_handler, new_url_page_handler, redirect_handler, register_handler,
    register_page_handler, root_handler, show_url_handler, update_url_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/", get(root_handler))
            .route("/urls", get(list_urls_handler).post(create_url_handler))
            .route("/urls/new", get(new_url_page_handler))
            .route(
                "/urls/{short_code}",
                get(show_url_handler).post(update_url_handler),
            )
            .route("/urls/{short_code}/delete", post(delete_url_handler))
            .route("/u/{short_code}", get(redirect_handler))
            .route(
                "/register",
                get(register_page_handler).post(register_handler),
            )
            .route("/login", get(login_page_handler).post(login_handler))
            .route("/logout", post(logout_handler))
            .layer(CookieManagerLayer::new())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
