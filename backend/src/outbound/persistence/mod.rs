//! PostgreSQL persistence adapters using Diesel.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; adapters convert them to domain types before
//! returning. Driver failures are classified once in `error_mapping.rs`.
//!
//! ```no_run
//! use aske_id::outbound::persistence::{DbPool, DieselIdentifierRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/aske")).await?;
//! let identifiers = DieselIdentifierRepository::new(pool);
//! # let _ = identifiers;
//! # Ok(())
//! # }
//! ```

mod diesel_identifier_repository;
mod diesel_registrant_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_identifier_repository::DieselIdentifierRepository;
pub use diesel_registrant_repository::DieselRegistrantRepository;
pub use migrations::{MigrationError, run_pending_migrations, run_pending_migrations_blocking};
pub use pool::{DbPool, PoolConfig, PoolError};
