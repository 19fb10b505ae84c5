//! Redirect resolution with visit counting.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tinyapp_redirector::{Redirector, RedirectorService};
//! use tinyapp_storage::InMemoryAliasRepository;
//! use tinyapp_core::Alias;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let aliases = Arc::new(InMemoryAliasRepository::new());
//! let service = RedirectorService::new(aliases);
//!
//! let alias = Alias::new("b2xVn2")?;
//! let record = service.visit(&alias, "203.0.113.7").await?;
//! println!("Redirect to: {}", record.target_url);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod redirector;
pub mod service;

pub use error::{RedirectorError, Result};
pub use redirector::Redirector;
pub use service::RedirectorService;
