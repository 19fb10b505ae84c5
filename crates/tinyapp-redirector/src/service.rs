use std::sync::Arc;

use crate::redirector::Redirector;
use crate::RedirectorError;
use async_trait::async_trait;
use tinyapp_core::{Alias, AliasRecord, AliasRepository};
use tracing::{debug, trace};

/// Service for handling short url redirects.
///
/// Each redirect bumps the alias' visit statistics inside the store's lock,
/// so concurrent visits are never lost.
#[derive(Debug)]
pub struct RedirectorService<R> {
    repository: Arc<R>,
}

impl<R> Clone for RedirectorService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: AliasRepository> RedirectorService<R> {
    /// Creates a new RedirectorService over a shared alias store.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Records a visit from `visitor` without resolving anything else.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The visit was counted
    /// * `Err(NotFound)` - The alias does not exist
    /// * `Err(Storage)` - The store failed
    pub async fn record_visit(&self, alias: &Alias, visitor: &str) -> crate::Result<()> {
        self.repository.record_visit(alias, visitor).await?;
        Ok(())
    }
}

#[async_trait]
impl<R: AliasRepository> Redirector for RedirectorService<R> {
    async fn visit(&self, alias: &Alias, visitor: &str) -> crate::Result<AliasRecord> {
        trace!(alias = %alias, visitor, "resolving short url");

        match self.repository.record_visit(alias, visitor).await {
            Ok(record) => {
                debug!(
                    alias = %alias,
                    url = %record.target_url,
                    total_visits = record.visits.total_visits,
                    unique_visitors = record.visits.unique_visitors,
                    "resolved short url"
                );
                Ok(record)
            }
            Err(e) => {
                let e = RedirectorError::from(e);
                if matches!(e, RedirectorError::NotFound(_)) {
                    trace!(alias = %alias, "short url not found");
                }
                Err(e)
            }
        }
    }
}
