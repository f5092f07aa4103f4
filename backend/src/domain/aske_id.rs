//! Opaque 128-bit tokens: issued identifiers and registrant API keys.
//!
//! Both tokens are UUIDs drawn from the operating system's CSPRNG
//! (`Uuid::new_v4`), so uniqueness holds without coordination between
//! concurrent requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Validation errors returned when parsing tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenValidationError {
    /// The input was empty.
    #[error("token must not be empty")]
    Empty,
    /// The input was not a UUID.
    #[error("token must be a valid UUID")]
    Malformed,
}

fn parse_token(raw: &str) -> Result<Uuid, TokenValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TokenValidationError::Empty);
    }
    Uuid::parse_str(trimmed).map_err(|_| TokenValidationError::Malformed)
}

/// Identifier issued by the registry.
///
/// # Examples
/// ```
/// use aske_id::domain::AskeId;
///
/// let id: AskeId = "3fa85f64-5717-4562-b3fc-2c963f66afa6".parse().expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AskeId(Uuid);

impl AskeId {
    /// Draw a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for AskeId {
    type Err = TokenValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s).map(Self)
    }
}

impl fmt::Display for AskeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Number of digest bytes kept in an API key fingerprint.
const FINGERPRINT_BYTES: usize = 8;

/// Opaque per-registrant credential.
///
/// `Debug` prints only a fingerprint so keys never reach the logs.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApiKey(Uuid);

impl ApiKey {
    /// Draw a fresh key for a new registrant.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Truncated SHA-256 fingerprint, safe for logs.
    ///
    /// # Examples
    /// ```
    /// use aske_id::domain::ApiKey;
    ///
    /// let key = ApiKey::generate();
    /// let fp = key.fingerprint();
    /// assert_eq!(fp.len(), 16);
    /// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(digest.iter().take(FINGERPRINT_BYTES).copied().collect::<Vec<u8>>())
    }

    /// Reveal the key text. Only the admin CLI should need this.
    #[must_use]
    pub fn expose(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl FromStr for ApiKey {
    type Err = TokenValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_token(s).map(Self)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.fingerprint()).finish()
    }
}
