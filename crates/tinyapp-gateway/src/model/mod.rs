mod health;
mod url;
mod user;

pub use health::HealthResponse;
pub use url::{UrlForm, UrlIndexView, UrlShowView, UrlView};
pub use user::{CredentialsForm, PageView, UserView};

use serde::Serialize;

/// Body of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorView {
    pub error: String,
}
