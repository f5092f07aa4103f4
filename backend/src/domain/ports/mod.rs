//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are what inbound adapters call;
//! driven ports (`*Repository`) are what outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod creation_command;
mod identifier_repository;
mod registrant_repository;
mod registration_command;
mod reservation_command;
mod resolution_query;

pub use creation_command::{CreateItem, CreatedIdentifier, CreationCommand};
#[cfg(test)]
pub use identifier_repository::MockIdentifierRepository;
pub use identifier_repository::{IdentifierRepository, IdentifierRepositoryError, PageRequest};
#[cfg(test)]
pub use registrant_repository::MockRegistrantRepository;
pub use registrant_repository::{RegistrantRepository, RegistrantRepositoryError};
pub use registration_command::{RegisterItem, RegistrationCommand};
pub use reservation_command::ReservationCommand;
pub use resolution_query::{LOOKUP_ALL, LookupTarget, ResolutionQuery};
