//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::num::NonZeroU32;

use aske_id::domain::{DEFAULT_LOOKUP_PAGE_SIZE, ReservationPolicy};
use aske_id::outbound::persistence::DbPool;
use aske_id::settings::{AppSettings, SeedRegistrant};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) url_prefix: String,
    pub(crate) cors_allowed_origins: Vec<String>,
    pub(crate) reservation_policy: ReservationPolicy,
    pub(crate) lookup_page_size: NonZeroU32,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_registrant: Option<SeedRegistrant>,
}

impl ServerConfig {
    /// Configuration serving from the root path with default limits and
    /// the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            url_prefix: String::new(),
            cors_allowed_origins: Vec::new(),
            reservation_policy: ReservationPolicy::default(),
            lookup_page_size: NonZeroU32::new(DEFAULT_LOOKUP_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            db_pool: None,
            seed_registrant: None,
        }
    }

    /// Derive everything but the pool from loaded settings.
    ///
    /// # Errors
    /// Returns [`std::io::ErrorKind::InvalidInput`] when `bind_addr` is not a
    /// socket address or the seed registrant key is malformed.
    pub fn from_settings(settings: &AppSettings) -> std::io::Result<Self> {
        let bind_addr: SocketAddr = settings.bind_addr().parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address '{}': {err}", settings.bind_addr()),
            )
        })?;
        let seed_registrant = settings.seed_registrant().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid memory registrant key: {err}"),
            )
        })?;
        let config = Self::new(bind_addr)
            .with_url_prefix(settings.url_prefix())
            .with_cors_allowed_origins(settings.cors_allowed_origins())
            .with_reservation_policy(settings.reservation_policy())
            .with_lookup_page_size(settings.lookup_page_size());
        Ok(match seed_registrant {
            Some(seed) => config.with_seed_registrant(seed),
            None => config,
        })
    }

    /// Mount every route under `prefix`.
    #[must_use]
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// Restrict CORS to `origins`; an empty list allows any origin.
    #[must_use]
    pub fn with_cors_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_allowed_origins = origins;
        self
    }

    /// Override reservation count bounds.
    #[must_use]
    pub fn with_reservation_policy(mut self, policy: ReservationPolicy) -> Self {
        self.reservation_policy = policy;
        self
    }

    /// Override the bulk listing page size.
    #[must_use]
    pub fn with_lookup_page_size(mut self, page_size: NonZeroU32) -> Self {
        self.lookup_page_size = page_size;
        self
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Preload `seed` into the in-memory store used without a database.
    #[must_use]
    pub fn with_seed_registrant(mut self, seed: SeedRegistrant) -> Self {
        self.seed_registrant = Some(seed);
        self
    }

    /// Socket address the server binds to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
