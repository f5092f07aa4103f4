//! ASKE-ID registry library.
//!
//! Issues, binds and resolves persistent identifiers for registered
//! organizations. The crate is laid out as ports and adapters:
//!
//! - [`domain`]: identifier lifecycle, authorization and port traits.
//! - [`inbound`]: the Actix HTTP surface.
//! - [`outbound`]: PostgreSQL and in-memory stores.
//! - [`settings`]: OrthoConfig-backed service settings.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;
