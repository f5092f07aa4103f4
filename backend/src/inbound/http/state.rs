//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on the driving
//! ports, so they can be exercised against any store.

use std::num::NonZeroU32;
use std::sync::Arc;

use crate::domain::ports::{
    CreationCommand, IdentifierRepository, RegistrantRepository, RegistrationCommand,
    ReservationCommand, ResolutionQuery,
};
use crate::domain::{
    CreationService, RegistrationService, ReservationPolicy, ReservationService,
    ResolutionService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Reserve use-case.
    pub reservation: Arc<dyn ReservationCommand>,
    /// Create use-case.
    pub creation: Arc<dyn CreationCommand>,
    /// Register use-case.
    pub registration: Arc<dyn RegistrationCommand>,
    /// Public lookup.
    pub resolution: Arc<dyn ResolutionQuery>,
}

impl HttpState {
    /// Wire the four use-case services over one registrant directory and
    /// one identifier store.
    ///
    /// ```
    /// use std::num::NonZeroU32;
    /// use std::sync::Arc;
    /// use aske_id::domain::ReservationPolicy;
    /// use aske_id::inbound::http::state::HttpState;
    /// use aske_id::outbound::memory::InMemoryRegistry;
    ///
    /// let registry = Arc::new(InMemoryRegistry::new());
    /// let _state = HttpState::from_repositories(
    ///     Arc::clone(&registry),
    ///     registry,
    ///     ReservationPolicy::default(),
    ///     NonZeroU32::MIN,
    /// );
    /// ```
    pub fn from_repositories<R, I>(
        registrants: Arc<R>,
        identifiers: Arc<I>,
        policy: ReservationPolicy,
        lookup_page_size: NonZeroU32,
    ) -> Self
    where
        R: RegistrantRepository + 'static,
        I: IdentifierRepository + 'static,
    {
        Self {
            reservation: Arc::new(ReservationService::new(
                Arc::clone(&registrants),
                Arc::clone(&identifiers),
                policy,
            )),
            creation: Arc::new(CreationService::new(
                Arc::clone(&registrants),
                Arc::clone(&identifiers),
            )),
            registration: Arc::new(RegistrationService::new(
                registrants,
                Arc::clone(&identifiers),
            )),
            resolution: Arc::new(ResolutionService::new(identifiers, lookup_page_size)),
        }
    }
}
