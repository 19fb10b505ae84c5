use crate::error::Result;
use async_trait::async_trait;
use tinyapp_core::{Alias, AliasRecord, UserId};

/// Alias lifecycle as seen by a request handler.
///
/// `requester` is the user id carried by the caller's session, if any.
/// Alias-scoped methods apply the access order documented on
/// [`AccessPolicy`][crate::AccessPolicy].
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Stores `target_url` under a freshly generated alias owned by the
    /// requester. Requires an authenticated requester.
    async fn shorten(&self, target_url: &str, requester: Option<&UserId>) -> Result<AliasRecord>;

    /// Looks a record up without any access check.
    async fn resolve(&self, alias: &Alias) -> Result<AliasRecord>;

    /// Returns a record to its owner.
    async fn show(&self, alias: &Alias, requester: Option<&UserId>) -> Result<AliasRecord>;

    /// Points an alias at a new target. Owner only.
    async fn update(
        &self,
        alias: &Alias,
        target_url: &str,
        requester: Option<&UserId>,
    ) -> Result<AliasRecord>;

    /// Deletes an alias. Owner only. Returns the removed record.
    async fn delete(&self, alias: &Alias, requester: Option<&UserId>) -> Result<AliasRecord>;

    /// Lists the requester's own records in no particular order.
    async fn list_for_user(&self, requester: Option<&UserId>) -> Result<Vec<AliasRecord>>;
}
