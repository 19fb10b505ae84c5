//! Store implementations for TinyApp.
//!
//! Only in-memory stores exist: records live for the lifetime of the
//! process and each store serializes its mutations behind a single lock.

pub mod memory;

pub use memory::{InMemoryAliasRepository, InMemoryUserRepository};
pub use tinyapp_core::repository::{
    AliasRepository, ReadAliasRepository, Result, UserRepository,
};
pub use tinyapp_core::StorageError;
