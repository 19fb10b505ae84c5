use crate::error::{Result, ShortenerError};
use crate::password::CredentialHasher;
use crate::service::GenerationSettings;
use async_trait::async_trait;
use std::sync::Arc;
use tinyapp_core::{StorageError, UserId, UserRecord, UserRepository};
use tinyapp_generator::Generator;
use tokio::task;
use tracing::{debug, info, trace};

/// Registration, login and session-identity lookups.
#[async_trait]
pub trait Accounts: Send + Sync + 'static {
    /// Creates an account and returns its id.
    ///
    /// Fails with `EmptyField` if either input is empty and `EmailTaken` if
    /// the email (exact, case-sensitive match) is already registered.
    async fn register(&self, email: &str, password: &str) -> Result<UserId>;

    /// Checks credentials and returns the account id.
    ///
    /// An unknown email and a wrong password both yield `CredentialMismatch`.
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId>;

    /// Resolves a session's user id to its account, if it still exists.
    async fn current_user(&self, session: Option<&UserId>) -> Result<Option<UserRecord>>;
}

/// [`Accounts`] backed by a user store, an id generator and a password hasher.
pub struct AccountService<U, G, H> {
    users: Arc<U>,
    generator: Arc<G>,
    hasher: Arc<H>,
    settings: GenerationSettings,
}

impl<U, G, H> Clone for AccountService<U, G, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            generator: Arc::clone(&self.generator),
            hasher: Arc::clone(&self.hasher),
            settings: self.settings.clone(),
        }
    }
}

impl<U: UserRepository, G: Generator, H: CredentialHasher> AccountService<U, G, H> {
    pub fn new(users: Arc<U>, generator: G, hasher: H) -> Self {
        Self {
            users,
            generator: Arc::new(generator),
            hasher: Arc::new(hasher),
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    // Argon2 is CPU and memory bound, so it runs on the blocking pool.
    async fn hash_password(&self, password: &str) -> Result<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ShortenerError::Hashing(e.to_string()))?
    }

    async fn verify_password(&self, password: &str, hash: String) -> Result<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| ShortenerError::Hashing(e.to_string()))?
    }
}

#[async_trait]
impl<U: UserRepository, G: Generator, H: CredentialHasher> Accounts for AccountService<U, G, H> {
    async fn register(&self, email: &str, password: &str) -> Result<UserId> {
        if email.is_empty() || password.is_empty() {
            return Err(ShortenerError::EmptyField);
        }

        // Fail fast before paying for a hash; the insert below re-checks.
        if self.users.find_by_email(email).await?.is_some() {
            debug!(email, "registration rejected, email in use");
            return Err(ShortenerError::EmailTaken(email.to_owned()));
        }

        let password_hash = self.hash_password(password).await?;

        for attempt in 1..=self.settings.max_attempts {
            let id = UserId::new_unchecked(self.generator.generate().as_ref());
            let record = UserRecord {
                id: id.clone(),
                email: email.to_owned(),
                password_hash: password_hash.clone(),
            };

            match self.users.insert(record).await {
                Ok(()) => {
                    info!(user = %id, email, "registered user");
                    return Ok(id);
                }
                Err(StorageError::Conflict(taken)) => {
                    trace!(user = %taken, attempt, "user id taken, drawing again");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ShortenerError::GenerationExhausted(self.settings.max_attempts))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId> {
        let Some(user) = self.users.find_by_email(email).await? else {
            debug!(email, "login failed");
            return Err(ShortenerError::CredentialMismatch);
        };

        if !self.verify_password(password, user.password_hash.clone()).await? {
            debug!(email, "login failed");
            return Err(ShortenerError::CredentialMismatch);
        }

        info!(user = %user.id, "user logged in");
        Ok(user.id)
    }

    async fn current_user(&self, session: Option<&UserId>) -> Result<Option<UserRecord>> {
        match session {
            Some(id) => Ok(self.users.get(id).await?),
            None => Ok(None),
        }
    }
}
