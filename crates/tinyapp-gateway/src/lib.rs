//! HTTP gateway for TinyApp.
//!
//! Wires the shortener, account and redirector services behind an axum
//! router. Views are emitted as JSON documents; rendering them is left to
//! whatever front end consumes the API.

pub mod app;
pub mod cli;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod seed;
pub mod session;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::{AppState, Bootstrap};
