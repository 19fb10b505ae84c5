//! Alias lifecycle, accounts and access control for TinyApp.
//!
//! This crate provides the services a request handler talks to. Identifiers
//! and store contracts come from `tinyapp_core`; identifier drawing comes
//! from `tinyapp_generator`.

pub mod access;
pub mod account;
pub mod error;
pub mod password;
pub mod service;
pub mod shortener;
pub mod target;

pub use access::AccessPolicy;
pub use account::{AccountService, Accounts};
pub use error::ShortenerError;
pub use password::{Argon2Hasher, CredentialHasher};
pub use service::{GenerationSettings, ShortenerService};
pub use shortener::Shortener;
pub use target::normalize_target;
