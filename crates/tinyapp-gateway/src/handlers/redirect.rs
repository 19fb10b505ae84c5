use crate::error::Result;
use crate::extract::VisitorAddress;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::Redirect;
use tinyapp_core::Alias;
use tinyapp_redirector::RedirectorError;

/// `GET /u/{alias}`: counts the visit and sends the client to the target.
/// Open to anonymous visitors.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    VisitorAddress(visitor): VisitorAddress,
) -> Result<Redirect> {
    let alias =
        Alias::new(short_code.as_str()).map_err(|_| RedirectorError::NotFound(short_code))?;
    let record = state.redirector.visit(&alias, &visitor).await?;
    Ok(Redirect::to(&record.target_url))
}
