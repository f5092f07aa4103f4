//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and are
//! converted to domain types before leaving it.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{ApiKey, AskeId, IdentifierRecord, Location, Registrant, RegistrantId};

use super::schema::{object, registrant};

/// Row struct for reading from the registrant table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = registrant)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RegistrantRow {
    pub id: i32,
    pub name: String,
    pub api_key: Uuid,
}

impl From<RegistrantRow> for Registrant {
    fn from(row: RegistrantRow) -> Self {
        Self::new(
            RegistrantId::new(row.id),
            row.name,
            ApiKey::from_uuid(row.api_key),
        )
    }
}

/// Insertable struct for provisioning registrants.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registrant)]
pub(crate) struct NewRegistrantRow<'a> {
    pub name: &'a str,
    pub api_key: Uuid,
}

/// Row struct for reading from the object table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = object)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ObjectRow {
    pub id: Uuid,
    pub registrant_id: i32,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl From<ObjectRow> for IdentifierRecord {
    fn from(row: ObjectRow) -> Self {
        Self {
            id: AskeId::from_uuid(row.id),
            registrant_id: RegistrantId::new(row.registrant_id),
            location: row.location.map(Location::from_stored),
            description: row.description,
        }
    }
}

/// Insertable struct for reserved or created identifiers.
///
/// `None` fields fall back to the column default (NULL).
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = object)]
pub(crate) struct NewObjectRow<'a> {
    pub id: Uuid,
    pub registrant_id: i32,
    pub location: Option<&'a str>,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a IdentifierRecord> for NewObjectRow<'a> {
    fn from(record: &'a IdentifierRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            registrant_id: record.registrant_id.get(),
            location: record.location.as_ref().map(Location::as_str),
            description: record.description.as_deref(),
        }
    }
}
