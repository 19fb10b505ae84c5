use crate::error::{Result, ShortenerError};
use std::sync::Arc;
use tinyapp_core::{Alias, AliasRecord, ReadAliasRepository, UserId, UserRepository};
use tracing::{trace, warn};

/// Decides who may see and change which alias records.
///
/// Alias-scoped operations are checked in a fixed order:
///
/// 1. the alias exists, else [`ShortenerError::AliasNotFound`];
/// 2. the requester has a session naming an existing user, else
///    [`ShortenerError::Unauthorized`];
/// 3. the requester owns the alias, else [`ShortenerError::Forbidden`].
#[derive(Debug)]
pub struct AccessPolicy<A, U> {
    aliases: Arc<A>,
    users: Arc<U>,
}

impl<A, U> Clone for AccessPolicy<A, U> {
    fn clone(&self) -> Self {
        Self {
            aliases: Arc::clone(&self.aliases),
            users: Arc::clone(&self.users),
        }
    }
}

impl<A: ReadAliasRepository, U: UserRepository> AccessPolicy<A, U> {
    pub fn new(aliases: Arc<A>, users: Arc<U>) -> Self {
        Self { aliases, users }
    }

    /// True iff `requester` names a user that exists in the user store.
    ///
    /// A session outliving its user (e.g. after a restart wiped the store)
    /// is not authenticated.
    pub async fn is_authenticated(&self, requester: Option<&UserId>) -> Result<bool> {
        match requester {
            Some(user) => Ok(self.users.exists(user).await?),
            None => Ok(false),
        }
    }

    /// True iff `alias` exists and is owned by `user`.
    pub async fn is_owner(&self, user: &UserId, alias: &Alias) -> Result<bool> {
        Ok(self
            .aliases
            .get(alias)
            .await?
            .is_some_and(|record| record.is_owned_by(user)))
    }

    /// Returns the requester's id, or `Unauthorized`.
    pub async fn authenticated(&self, requester: Option<&UserId>) -> Result<UserId> {
        if let Some(user) = requester {
            if self.users.exists(user).await? {
                return Ok(user.clone());
            }
        }
        Err(ShortenerError::Unauthorized)
    }

    /// Applies the three-step check and returns the authorized requester
    /// together with the record.
    pub async fn authorize(
        &self,
        alias: &Alias,
        requester: Option<&UserId>,
    ) -> Result<(UserId, AliasRecord)> {
        let record = self
            .aliases
            .get(alias)
            .await?
            .ok_or_else(|| ShortenerError::AliasNotFound(alias.to_string()))?;

        let user = self.authenticated(requester).await?;

        if !record.is_owned_by(&user) {
            warn!(alias = %alias, user = %user, "access denied to alias owned by another user");
            return Err(ShortenerError::Forbidden(alias.to_string()));
        }

        trace!(alias = %alias, user = %user, "access granted");
        Ok((user, record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::Date;
    use tinyapp_core::{AliasRepository, UserRecord};
    use tinyapp_storage::{InMemoryAliasRepository, InMemoryUserRepository};

    const OWNER: &str = "owner1";
    const OTHER: &str = "other2";

    async fn setup() -> AccessPolicy<InMemoryAliasRepository, InMemoryUserRepository> {
        let aliases = Arc::new(InMemoryAliasRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());

        for (id, email) in [(OWNER, "owner@x.com"), (OTHER, "other@x.com")] {
            users
                .insert(UserRecord {
                    id: UserId::new_unchecked(id),
                    email: email.to_string(),
                    password_hash: String::new(),
                })
                .await
                .unwrap();
        }

        aliases
            .insert(AliasRecord::new(
                Alias::new_unchecked("abc123"),
                "http://example.com".to_string(),
                Some(UserId::new_unchecked(OWNER)),
                Date::constant(2024, 1, 1),
            ))
            .await
            .unwrap();

        AccessPolicy::new(aliases, users)
    }

    fn user(id: &str) -> UserId {
        UserId::new_unchecked(id)
    }

    #[tokio::test]
    async fn authentication_requires_existing_user() {
        let policy = setup().await;

        assert!(policy.is_authenticated(Some(&user(OWNER))).await.unwrap());
        assert!(!policy.is_authenticated(Some(&user("ghost9"))).await.unwrap());
        assert!(!policy.is_authenticated(None).await.unwrap());
    }

    #[tokio::test]
    async fn ownership() {
        let policy = setup().await;
        let alias = Alias::new_unchecked("abc123");

        assert!(policy.is_owner(&user(OWNER), &alias).await.unwrap());
        assert!(!policy.is_owner(&user(OTHER), &alias).await.unwrap());
        assert!(!policy
            .is_owner(&user(OWNER), &Alias::new_unchecked("nope00"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn missing_alias_is_reported_before_authentication() {
        let policy = setup().await;

        let err = policy
            .authorize(&Alias::new_unchecked("nope00"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::AliasNotFound(_)));
    }

    #[tokio::test]
    async fn anonymous_requester_is_unauthorized() {
        let policy = setup().await;
        let alias = Alias::new_unchecked("abc123");

        let err = policy.authorize(&alias, None).await.unwrap_err();
        assert_eq!(err, ShortenerError::Unauthorized);

        let err = policy
            .authorize(&alias, Some(&user("ghost9")))
            .await
            .unwrap_err();
        assert_eq!(err, ShortenerError::Unauthorized);
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let policy = setup().await;

        let err = policy
            .authorize(&Alias::new_unchecked("abc123"), Some(&user(OTHER)))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortenerError::Forbidden(_)));
    }

    #[tokio::test]
    async fn owner_is_authorized() {
        let policy = setup().await;

        let (who, record) = policy
            .authorize(&Alias::new_unchecked("abc123"), Some(&user(OWNER)))
            .await
            .unwrap();
        assert_eq!(who, user(OWNER));
        assert_eq!(record.target_url, "http://example.com");
    }
}
