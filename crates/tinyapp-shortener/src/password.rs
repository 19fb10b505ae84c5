use crate::error::{Result, ShortenerError};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// A salted one-way password hash with verification.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hashes `plaintext` with a fresh random salt.
    fn hash(&self, plaintext: &str) -> Result<String>;

    /// Checks `plaintext` against a hash produced by [`CredentialHasher::hash`].
    ///
    /// A mismatch is `Ok(false)`; only an unreadable hash is an error.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool>;
}

/// Argon2id hasher producing PHC strings (`$argon2id$v=19$...`).
#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}

impl Argon2Hasher {
    /// Uses the argon2 crate's recommended parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses explicit cost parameters: memory in KiB, iterations, lanes.
    ///
    /// Low costs make test suites fast; production should stick to
    /// [`Argon2Hasher::new`].
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| ShortenerError::Hashing(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| ShortenerError::Hashing(e.to_string()))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| ShortenerError::Hashing(e.to_string()))?;
        Ok(self
            .argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}
