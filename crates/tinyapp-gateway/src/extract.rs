use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;
use std::net::SocketAddr;

/// Recorded when a request carries no usable address.
pub const UNKNOWN_VISITOR: &str = "unknown";

/// The address a visit is attributed to.
///
/// Taken from the first `X-Forwarded-For` entry when present, else the peer
/// address of the connection, else [`UNKNOWN_VISITOR`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorAddress(pub String);

impl<S: Send + Sync> FromRequestParts<S> for VisitorAddress {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        if let Some(address) = forwarded {
            return Ok(Self(address.to_owned()));
        }

        if let Some(ConnectInfo(peer)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Ok(Self(peer.ip().to_string()));
        }

        Ok(Self(UNKNOWN_VISITOR.to_owned()))
    }
}
