use crate::alias::{Alias, UserId};
use crate::error::StorageError;
use async_trait::async_trait;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Per-alias redirect statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitStats {
    pub total_visits: u64,
    pub unique_visitors: u64,
    pub seen_addresses: HashSet<String>,
}

impl VisitStats {
    /// Counts one visit from `address`.
    pub fn record(&mut self, address: &str) {
        self.total_visits += 1;
        if self.seen_addresses.insert(address.to_owned()) {
            self.unique_visitors += 1;
        }
    }
}

/// A stored alias → target mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub alias: Alias,
    /// Normalized absolute URL visitors are redirected to.
    pub target_url: String,
    /// `None` for anonymous records, which nobody may modify.
    pub owner: Option<UserId>,
    pub created_at: Date,
    pub visits: VisitStats,
}

impl AliasRecord {
    /// Creates a record with zeroed statistics.
    pub fn new(alias: Alias, target_url: String, owner: Option<UserId>, created_at: Date) -> Self {
        Self {
            alias,
            target_url,
            owner,
            created_at,
            visits: VisitStats::default(),
        }
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner.as_ref() == Some(user)
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    /// PHC-formatted salted hash; the plaintext is never stored.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Read access to the alias store.
#[async_trait]
pub trait ReadAliasRepository: Send + Sync + 'static {
    /// Retrieves the record stored under `alias`.
    /// Returns `None` if the alias does not exist.
    async fn get(&self, alias: &Alias) -> Result<Option<AliasRecord>>;

    /// Checks whether an alias is already taken.
    async fn exists(&self, alias: &Alias) -> Result<bool>;

    /// Returns every record owned by `owner`, in no particular order.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<AliasRecord>>;
}

/// Mutating access to the alias store.
///
/// Every method is a single atomic step with respect to other calls on the
/// same store: ownership checks and the mutation they guard happen under one
/// lock acquisition.
#[async_trait]
pub trait AliasRepository: ReadAliasRepository {
    /// Inserts a new record. Returns `Err(Conflict)` if the alias is taken.
    async fn insert(&self, record: AliasRecord) -> Result<()>;

    /// Replaces the target of a record owned by `owner`.
    ///
    /// Fails with `NotFound` if the alias is absent and `OwnerMismatch` if
    /// `owner` does not own it. Returns the updated record.
    async fn update_target(
        &self,
        alias: &Alias,
        owner: &UserId,
        target_url: String,
    ) -> Result<AliasRecord>;

    /// Removes a record owned by `owner` and returns it.
    ///
    /// Same failure modes as [`AliasRepository::update_target`].
    async fn remove(&self, alias: &Alias, owner: &UserId) -> Result<AliasRecord>;

    /// Counts a visit from `address` and returns the updated record.
    /// Fails with `NotFound` if the alias is absent.
    async fn record_visit(&self, alias: &Alias, address: &str) -> Result<AliasRecord>;
}

/// The user store.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Inserts a new account.
    ///
    /// Returns `Err(Conflict)` if the id is taken and `Err(EmailTaken)` if
    /// another account already uses the email. Nothing is written on error.
    async fn insert(&self, record: UserRecord) -> Result<()>;

    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>>;

    /// Looks an account up by exact (case-sensitive) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    async fn exists(&self, id: &UserId) -> Result<bool>;
}
