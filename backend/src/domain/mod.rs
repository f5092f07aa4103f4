//! Domain primitives, services and ports.
//!
//! Purpose: own the identifier lifecycle (reserve, create, register,
//! resolve) and its authorization rules, independent of HTTP and SQL.
//!
//! Public surface:
//! - `AskeId`, `ApiKey`: opaque 128-bit tokens.
//! - `Registrant`, `IdentifierRecord`, `BibRecord`: data model.
//! - `Error` / `ErrorCode`: transport-agnostic failure taxonomy.
//! - `ReservationService`, `CreationService`, `RegistrationService`,
//!   `ResolutionService`: implementations of the driving ports.

pub mod aske_id;
pub mod authorization;
pub mod batch;
pub mod creation_service;
pub mod error;
pub mod identifier;
pub mod ports;
pub mod registrant;
pub mod registration_service;
pub mod reservation_service;
pub mod resolution_service;

pub use self::aske_id::{ApiKey, AskeId, TokenValidationError};
pub use self::authorization::{owns, parse_api_key, resolve_registrant};
pub use self::batch::{BatchReport, ItemOutcome, SkipReason};
pub use self::creation_service::CreationService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifier::{
    ASKE_ID_TYPE, BibIdentifier, BibLink, BibMetadata, BibRecord, IdentifierRecord, Location,
    LocationValidationError, ResolvedIdentifier,
};
pub use self::registrant::{Registrant, RegistrantId};
pub use self::registration_service::RegistrationService;
pub use self::reservation_service::{
    DEFAULT_MAX_RESERVE_COUNT, DEFAULT_RESERVE_COUNT, ReservationPolicy, ReservationService,
};
pub use self::resolution_service::{DEFAULT_LOOKUP_PAGE_SIZE, ResolutionService};
