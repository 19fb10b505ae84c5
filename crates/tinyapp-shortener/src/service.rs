use crate::access::AccessPolicy;
use crate::error::{Result, ShortenerError};
use crate::shortener::Shortener;
use crate::target::normalize_target;
use async_trait::async_trait;
use jiff::Zoned;
use std::sync::Arc;
use tinyapp_core::{Alias, AliasRecord, AliasRepository, StorageError, UserId, UserRepository};
use tinyapp_generator::Generator;
use tracing::{debug, info, trace};

pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

/// Bounds the draw-again loop used when a generated identifier is taken.
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub struct GenerationSettings {
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps the alias store, the access policy and a `Generator`
/// to handle:
/// - target normalization
/// - alias allocation, drawing again while the generated alias is taken
/// - ownership-checked updates and deletes
///
/// Allocation relies on [`AliasRepository::insert`] being an atomic
/// check-then-insert, so two concurrent creations can never end up on the
/// same alias.
#[derive(Debug)]
pub struct ShortenerService<A, U, G> {
    aliases: Arc<A>,
    access: AccessPolicy<A, U>,
    generator: Arc<G>,
    settings: GenerationSettings,
}

impl<A, U, G> Clone for ShortenerService<A, U, G> {
    fn clone(&self) -> Self {
        Self {
            aliases: Arc::clone(&self.aliases),
            access: self.access.clone(),
            generator: Arc::clone(&self.generator),
            settings: self.settings.clone(),
        }
    }
}

impl<A: AliasRepository, U: UserRepository, G: Generator> ShortenerService<A, U, G> {
    pub fn new(aliases: Arc<A>, users: Arc<U>, generator: G) -> Self {
        Self {
            access: AccessPolicy::new(Arc::clone(&aliases), users),
            aliases,
            generator: Arc::new(generator),
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Normalizes `target_url`, allocates an unused alias and stores a new
    /// record with zeroed statistics.
    ///
    /// No access check happens here; `owner` is recorded as given, and
    /// `None` creates an anonymous record.
    pub async fn create(&self, target_url: &str, owner: Option<UserId>) -> Result<AliasRecord> {
        let target_url = normalize_target(target_url)?;
        let created_at = Zoned::now().date();

        for attempt in 1..=self.settings.max_attempts {
            let alias = Alias::new_unchecked(self.generator.generate().as_ref());
            let record = AliasRecord::new(alias, target_url.clone(), owner.clone(), created_at);

            match self.aliases.insert(record.clone()).await {
                Ok(()) => {
                    info!(
                        alias = %record.alias,
                        target_url = %record.target_url,
                        owner = ?record.owner.as_ref().map(UserId::as_str),
                        "created short url"
                    );
                    return Ok(record);
                }
                Err(StorageError::Conflict(taken)) => {
                    trace!(alias = %taken, attempt, "alias taken, drawing again");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ShortenerError::GenerationExhausted(self.settings.max_attempts))
    }
}

#[async_trait]
impl<A: AliasRepository, U: UserRepository, G: Generator> Shortener
    for ShortenerService<A, U, G>
{
    async fn shorten(&self, target_url: &str, requester: Option<&UserId>) -> Result<AliasRecord> {
        let owner = self.access.authenticated(requester).await?;
        self.create(target_url, Some(owner)).await
    }

    async fn resolve(&self, alias: &Alias) -> Result<AliasRecord> {
        self.aliases
            .get(alias)
            .await?
            .ok_or_else(|| ShortenerError::AliasNotFound(alias.to_string()))
    }

    async fn show(&self, alias: &Alias, requester: Option<&UserId>) -> Result<AliasRecord> {
        let (_, record) = self.access.authorize(alias, requester).await?;
        Ok(record)
    }

    async fn update(
        &self,
        alias: &Alias,
        target_url: &str,
        requester: Option<&UserId>,
    ) -> Result<AliasRecord> {
        let (owner, _) = self.access.authorize(alias, requester).await?;
        let target_url = normalize_target(target_url)?;

        // The store re-checks ownership under its lock.
        let record = self
            .aliases
            .update_target(alias, &owner, target_url)
            .await?;
        debug!(alias = %alias, target_url = %record.target_url, "updated short url");
        Ok(record)
    }

    async fn delete(&self, alias: &Alias, requester: Option<&UserId>) -> Result<AliasRecord> {
        let (owner, _) = self.access.authorize(alias, requester).await?;

        let record = self.aliases.remove(alias, &owner).await?;
        info!(alias = %alias, owner = %owner, "deleted short url");
        Ok(record)
    }

    async fn list_for_user(&self, requester: Option<&UserId>) -> Result<Vec<AliasRecord>> {
        let owner = self.access.authenticated(requester).await?;
        Ok(self.aliases.list_by_owner(&owner).await?)
    }
}
