//! Core types and traits for TinyApp.
//!
//! This crate provides the identifiers, records and store contracts shared
//! by the shortener, the redirector and the HTTP gateway.

pub mod alias;
pub mod error;
pub mod repository;

pub use alias::{Alias, UserId};
pub use error::{CoreError, StorageError};
pub use repository::{
    AliasRecord, AliasRepository, ReadAliasRepository, UserRecord, UserRepository, VisitStats,
};
