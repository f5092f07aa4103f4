//! Registrant accounts.
//!
//! Registrants are created out-of-band (see the `aske-id-admin` binary) and
//! are immutable afterwards.

use std::fmt;

use super::ApiKey;

/// Database identity of a registrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrantId(i32);

impl RegistrantId {
    /// Wrap a raw row identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw row identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RegistrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account entity authorised to reserve, create and register identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrant {
    id: RegistrantId,
    name: String,
    api_key: ApiKey,
}

impl Registrant {
    /// Assemble a registrant from stored parts.
    pub fn new(id: RegistrantId, name: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            id,
            name: name.into(),
            api_key,
        }
    }

    /// Row identity.
    #[must_use]
    pub const fn id(&self) -> RegistrantId {
        self.id
    }

    /// Display name shown in resolved records.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Credential identifying this registrant.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}
