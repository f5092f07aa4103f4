//! Identifier records and their public, bibliographic-link rendering.
//!
//! An [`IdentifierRecord`] with no location is "reserved but unregistered";
//! it resolves individually but never appears in the bulk listing.

use serde::Serialize;
use url::Url;

use super::{AskeId, RegistrantId};

/// Identifier type tag emitted in resolved records.
pub const ASKE_ID_TYPE: &str = "_aske-id";

/// Validation errors for bound locations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationValidationError {
    /// The location was empty.
    #[error("location must not be empty")]
    Empty,
    /// The location is not an absolute URI.
    #[error("location must be an absolute URI: {reason}")]
    NotAbsoluteUri {
        /// Parser diagnostic.
        reason: String,
    },
}

/// Resolvable location bound to an identifier.
///
/// The caller's text is kept verbatim; parsing only gates acceptance, so
/// `http://a` resolves as `http://a` rather than the normalised `http://a/`.
///
/// # Examples
/// ```
/// use aske_id::domain::Location;
///
/// let location = Location::parse("http://a").expect("absolute URI");
/// assert_eq!(location.as_str(), "http://a");
/// assert!(Location::parse("not a uri").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Validate caller-supplied text.
    ///
    /// # Errors
    /// Returns [`LocationValidationError`] when the text is blank or does not
    /// parse as an absolute URI.
    pub fn parse(raw: &str) -> Result<Self, LocationValidationError> {
        if raw.trim().is_empty() {
            return Err(LocationValidationError::Empty);
        }
        Url::parse(raw).map_err(|err| LocationValidationError::NotAbsoluteUri {
            reason: err.to_string(),
        })?;
        Ok(Self(raw.to_owned()))
    }

    /// Wrap a value already held by the store.
    #[must_use]
    pub const fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    /// Borrow the location text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored identifier row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRecord {
    /// Primary key.
    pub id: AskeId,
    /// Owning registrant.
    pub registrant_id: RegistrantId,
    /// Bound location; `None` until registered.
    pub location: Option<Location>,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl IdentifierRecord {
    /// Fresh reservation with nothing bound.
    #[must_use]
    pub const fn reserved(id: AskeId, registrant_id: RegistrantId) -> Self {
        Self {
            id,
            registrant_id,
            location: None,
            description: None,
        }
    }

    /// Whether the record appears in the bulk listing.
    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        self.location.is_some()
    }
}

/// Identifier record joined with its registrant's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentifier {
    /// The stored record.
    pub record: IdentifierRecord,
    /// Display name of the owning registrant.
    pub registrant_name: String,
}

/// Public metadata for one identifier, in bibliographic-link shape.
///
/// ```json
/// {
///   "identifier": [{"type": "_aske-id", "id": "..."}],
///   "link": [{"url": "http://..."}],
///   "metadata": {"description": "..."},
///   "registrant": "..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibRecord {
    /// Identifier entries; always exactly one ASKE-ID.
    pub identifier: Vec<BibIdentifier>,
    /// Link entries; always exactly one, possibly with a null URL.
    pub link: Vec<BibLink>,
    /// Descriptive metadata.
    pub metadata: BibMetadata,
    /// Registrant display name.
    pub registrant: String,
}

/// Identifier entry of a [`BibRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibIdentifier {
    /// Identifier scheme, always [`ASKE_ID_TYPE`].
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The identifier value.
    pub id: AskeId,
}

/// Link entry of a [`BibRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibLink {
    /// Bound location, `null` while only reserved.
    pub url: Option<Location>,
}

/// Metadata entry of a [`BibRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibMetadata {
    /// Bound description, if any.
    pub description: Option<String>,
}

impl From<ResolvedIdentifier> for BibRecord {
    fn from(value: ResolvedIdentifier) -> Self {
        let ResolvedIdentifier {
            record,
            registrant_name,
        } = value;
        Self {
            identifier: vec![BibIdentifier {
                kind: ASKE_ID_TYPE,
                id: record.id,
            }],
            link: vec![BibLink {
                url: record.location,
            }],
            metadata: BibMetadata {
                description: record.description,
            },
            registrant: registrant_name,
        }
    }
}
