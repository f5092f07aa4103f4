//! Port wiring for the HTTP state.

use std::sync::Arc;

use tracing::{info, warn};

use aske_id::inbound::http::state::HttpState;
use aske_id::outbound::memory::InMemoryRegistry;
use aske_id::outbound::persistence::{DieselIdentifierRepository, DieselRegistrantRepository};

use super::ServerConfig;

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-memory registry holding the configured seed registrant.
///
/// # Errors
/// Returns an I/O error when the seed registrant cannot be stored.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    if let Some(pool) = &config.db_pool {
        return Ok(HttpState::from_repositories(
            Arc::new(DieselRegistrantRepository::new(pool.clone())),
            Arc::new(DieselIdentifierRepository::new(pool.clone())),
            config.reservation_policy,
            config.lookup_page_size,
        ));
    }

    let registry = Arc::new(InMemoryRegistry::new());
    match &config.seed_registrant {
        Some(seed) => {
            let registrant = registry
                .add_registrant_with_key(&seed.name, seed.api_key)
                .map_err(std::io::Error::other)?;
            warn!("no database configured; using the in-memory registry");
            info!(
                registrant_id = %registrant.id(),
                key = %registrant.api_key().fingerprint(),
                "seeded in-memory registrant"
            );
        }
        None => warn!(
            "no database configured and no memory registrant key set; \
             write endpoints will reject every API key"
        ),
    }
    Ok(HttpState::from_repositories(
        Arc::clone(&registry),
        registry,
        config.reservation_policy,
        config.lookup_page_size,
    ))
}
