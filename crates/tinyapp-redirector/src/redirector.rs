use crate::Result;
use async_trait::async_trait;
use tinyapp_core::{Alias, AliasRecord};

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Counts a visit from `visitor` and returns the record to redirect to.
    /// Fails with `NotFound` if the alias does not exist.
    async fn visit(&self, alias: &Alias, visitor: &str) -> Result<AliasRecord>;
}
