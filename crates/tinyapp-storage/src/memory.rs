use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tinyapp_core::error::StorageError;
use tinyapp_core::repository::{
    AliasRecord, AliasRepository, ReadAliasRepository, Result, UserRecord, UserRepository,
};
use tinyapp_core::{Alias, UserId};

/// In-memory alias store.
///
/// A single mutex guards the whole map. Every trait method takes the lock
/// once and releases it before returning, so check-then-act sequences such as
/// "insert unless taken" or "update if owned" are atomic with respect to
/// concurrent requests.
#[derive(Debug, Default)]
pub struct InMemoryAliasRepository {
    records: Mutex<HashMap<Alias, AliasRecord>>,
}

impl InMemoryAliasRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`.
    ///
    /// Later records win when two share an alias.
    pub fn with_records(records: impl IntoIterator<Item = AliasRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.alias.clone(), record))
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

fn owned_entry<'a>(
    records: &'a mut HashMap<Alias, AliasRecord>,
    alias: &Alias,
    owner: &UserId,
) -> Result<&'a mut AliasRecord> {
    let record = records
        .get_mut(alias)
        .ok_or_else(|| StorageError::NotFound(alias.to_string()))?;

    if !record.is_owned_by(owner) {
        return Err(StorageError::OwnerMismatch {
            alias: alias.to_string(),
            requester: owner.to_string(),
        });
    }

    Ok(record)
}

#[async_trait]
impl ReadAliasRepository for InMemoryAliasRepository {
    async fn get(&self, alias: &Alias) -> Result<Option<AliasRecord>> {
        Ok(self.records.lock().get(alias).cloned())
    }

    async fn exists(&self, alias: &Alias) -> Result<bool> {
        Ok(self.records.lock().contains_key(alias))
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<AliasRecord>> {
        Ok(self
            .records
            .lock()
            .values()
            .filter(|record| record.is_owned_by(owner))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AliasRepository for InMemoryAliasRepository {
    async fn insert(&self, record: AliasRecord) -> Result<()> {
        match self.records.lock().entry(record.alias.clone()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(record.alias.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }

    async fn update_target(
        &self,
        alias: &Alias,
        owner: &UserId,
        target_url: String,
    ) -> Result<AliasRecord> {
        let mut records = self.records.lock();
        let record = owned_entry(&mut records, alias, owner)?;
        record.target_url = target_url;
        Ok(record.clone())
    }

    async fn remove(&self, alias: &Alias, owner: &UserId) -> Result<AliasRecord> {
        let mut records = self.records.lock();
        owned_entry(&mut records, alias, owner)?;
        records
            .remove(alias)
            .ok_or_else(|| StorageError::NotFound(alias.to_string()))
    }

    async fn record_visit(&self, alias: &Alias, address: &str) -> Result<AliasRecord> {
        let mut records = self.records.lock();
        let record = records
            .get_mut(alias)
            .ok_or_else(|| StorageError::NotFound(alias.to_string()))?;
        record.visits.record(address);
        Ok(record.clone())
    }
}

#[derive(Debug, Default)]
struct Users {
    by_id: HashMap<UserId, UserRecord>,
    by_email: HashMap<String, UserId>,
}

/// In-memory user store with an email index.
///
/// The id map and the email index live under the same lock so they can
/// never disagree.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Users>,
}

impl InMemoryUserRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.lock().by_id.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, record: UserRecord) -> Result<()> {
        let mut users = self.users.lock();

        if users.by_id.contains_key(&record.id) {
            return Err(StorageError::Conflict(record.id.to_string()));
        }
        if users.by_email.contains_key(&record.email) {
            return Err(StorageError::EmailTaken(record.email));
        }

        users.by_email.insert(record.email.clone(), record.id.clone());
        users.by_id.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &UserId) -> Result<Option<UserRecord>> {
        Ok(self.users.lock().by_id.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let users = self.users.lock();
        Ok(users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn exists(&self, id: &UserId) -> Result<bool> {
        Ok(self.users.lock().by_id.contains_key(id))
    }
}
