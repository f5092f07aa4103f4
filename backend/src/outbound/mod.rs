//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL via Diesel, `diesel-async` and `bb8`.
//! - **memory**: in-process store for tests and database-less runs.
//!
//! Adapters only translate between storage representations and domain
//! types; they hold no business rules.

pub mod memory;
pub mod persistence;
