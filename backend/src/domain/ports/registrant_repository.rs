//! Driven port for the registrant directory.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{ApiKey, Registrant};

define_port_error! {
    /// Errors raised by registrant directory adapters.
    pub enum RegistrantRepositoryError {
        /// The store could not be reached.
        Connection => "registrant store connection failed: {message}",
        /// A query failed during execution.
        Query => "registrant store query failed: {message}",
    }
}

/// Port for resolving and provisioning registrants.
///
/// Implementations must read the store on every call; registrant state is
/// never cached in-process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrantRepository: Send + Sync {
    /// Look up the registrant owning `api_key`.
    async fn find_by_api_key(
        &self,
        api_key: &ApiKey,
    ) -> Result<Option<Registrant>, RegistrantRepositoryError>;

    /// Provision a registrant with a freshly drawn key.
    async fn create(&self, name: &str) -> Result<Registrant, RegistrantRepositoryError>;
}
