//! Driving port for single-step create-and-bind.

use async_trait::async_trait;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::domain::{ApiKey, AskeId, BatchReport, Error, Location};

/// Canonical creation input: one location with an optional description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItem {
    /// Location text as supplied by the caller.
    pub location: String,
    /// Description, when the caller supplied a pair.
    pub description: Option<String>,
}

impl CreateItem {
    /// Item with no description.
    pub fn location(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            description: None,
        }
    }

    /// Item with a description.
    pub fn described(location: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            description: Some(description.into()),
        }
    }
}

/// A committed creation, serialized as `[id, location]` or
/// `[id, location, description]` mirroring the input shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIdentifier {
    /// Newly issued identifier.
    pub id: AskeId,
    /// Bound location.
    pub location: Location,
    /// Bound description, if supplied.
    pub description: Option<String>,
}

impl Serialize for CreatedIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.description.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.id)?;
        seq.serialize_element(&self.location)?;
        if let Some(description) = &self.description {
            seq.serialize_element(description)?;
        }
        seq.end()
    }
}

/// Use-case port: allocate and bind identifiers in one step.
#[async_trait]
pub trait CreationCommand: Send + Sync {
    /// Create one identifier per item, committing each independently.
    async fn create(
        &self,
        api_key: &ApiKey,
        items: Vec<CreateItem>,
    ) -> Result<BatchReport<CreatedIdentifier>, Error>;
}
