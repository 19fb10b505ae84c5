use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 32;

/// The short identifier a target URL is stored under.
///
/// Aliases are 1-32 ASCII alphanumeric characters. Generated aliases are
/// always six characters, but lookups accept anything in range so that a
/// malformed path segment is reported as "not found" rather than as a
/// different kind of failure.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alias(String);

impl Alias {
    /// Creates a new `Alias` after validating the input.
    pub fn new(alias: impl Into<String>) -> Result<Self, CoreError> {
        let alias = alias.into();
        validate_token(&alias).map_err(CoreError::InvalidAlias)?;
        Ok(Self(alias))
    }

    /// Creates an `Alias` without validation.
    ///
    /// Use this only for aliases produced by a trusted generator.
    pub fn new_unchecked(alias: impl Into<String>) -> Self {
        Self(alias.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/u/{}", base_url.trim_end_matches('/'), self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a registered user.
///
/// Doubles as the value carried by the session cookie.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parses a user id, e.g. from a cookie value.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        validate_token(&id).map_err(CoreError::InvalidUserId)?;
        Ok(Self(id))
    }

    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn validate_token(token: &str) -> Result<(), String> {
    if token.len() < MIN_LENGTH || token.len() > MAX_LENGTH {
        return Err(format!(
            "length must be between {} and {}, got {}",
            MIN_LENGTH,
            MAX_LENGTH,
            token.len()
        ));
    }

    if !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!(
            "must contain only alphanumeric characters: '{}'",
            token
        ));
    }

    Ok(())
}
