//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ASKE_ID_*` environment variables and an
//! optional configuration file, in increasing order of precedence.

use std::num::NonZeroU32;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

use crate::domain::{
    ApiKey, DEFAULT_LOOKUP_PAGE_SIZE, DEFAULT_MAX_RESERVE_COUNT, DEFAULT_RESERVE_COUNT,
    ReservationPolicy, TokenValidationError,
};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SEED_NAME: &str = "Local registrant";

/// Registrant preloaded into the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistrant {
    /// Display name.
    pub name: String,
    /// Key the registrant authenticates with.
    pub api_key: ApiKey,
}

/// Settings controlling the HTTP server and its store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ASKE_ID")]
pub struct AppSettings {
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Socket address to bind, `host:port`.
    pub bind_addr: Option<String>,
    /// Path prefix under which every route is mounted.
    pub url_prefix: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Idle database connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Connection checkout timeout in seconds.
    pub pool_timeout_secs: Option<u64>,
    /// Apply pending schema migrations at startup; on unless set to false.
    pub run_migrations: Option<bool>,
    /// CORS origins, as a list or one comma-separated string; any origin is
    /// allowed when unset.
    #[serde(default, deserialize_with = "origin_list")]
    pub cors_allowed_origins: Option<Vec<String>>,
    /// Identifiers reserved when a request omits `n`.
    pub default_reserve_count: Option<u32>,
    /// Largest `n` accepted by a single reservation.
    pub max_reserve_count: Option<u32>,
    /// Records per page of the bulk listing.
    pub lookup_page_size: Option<u32>,
    /// Display name of the registrant seeded without a database.
    pub memory_registrant_name: Option<String>,
    /// API key of the registrant seeded without a database.
    pub memory_registrant_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginList {
    One(String),
    Many(Vec<String>),
}

fn origin_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<OriginList>::deserialize(deserializer)?.map(|origins| match origins {
            OriginList::One(origin) => vec![origin],
            OriginList::Many(origins) => origins,
        }),
    )
}

impl AppSettings {
    /// Whether startup applies pending migrations.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Normalised route prefix: leading slash, no trailing slash, empty for
    /// the root.
    pub fn url_prefix(&self) -> String {
        let trimmed = self
            .url_prefix
            .as_deref()
            .map(|prefix| prefix.trim().trim_matches('/'))
            .unwrap_or_default();
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Explicit CORS origins; empty means permissive.
    pub fn cors_allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flatten()
            .flat_map(|entry| entry.split(','))
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Reservation count bounds.
    pub fn reservation_policy(&self) -> ReservationPolicy {
        ReservationPolicy {
            default_count: self.default_reserve_count.unwrap_or(DEFAULT_RESERVE_COUNT),
            max_count: self.max_reserve_count.unwrap_or(DEFAULT_MAX_RESERVE_COUNT),
        }
    }

    /// Bulk listing page size; zero falls back to the default.
    pub fn lookup_page_size(&self) -> NonZeroU32 {
        self.lookup_page_size
            .and_then(NonZeroU32::new)
            .or_else(|| NonZeroU32::new(DEFAULT_LOOKUP_PAGE_SIZE))
            .unwrap_or(NonZeroU32::MIN)
    }

    /// Registrant to preload into the in-memory store, when a key is set.
    ///
    /// # Errors
    /// Returns [`TokenValidationError`] when the configured key is malformed.
    pub fn seed_registrant(&self) -> Result<Option<SeedRegistrant>, TokenValidationError> {
        let Some(raw_key) = self.memory_registrant_key.as_deref() else {
            return Ok(None);
        };
        let api_key = raw_key.parse::<ApiKey>()?;
        let name = self
            .memory_registrant_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_SEED_NAME)
            .to_owned();
        Ok(Some(SeedRegistrant { name, api_key }))
    }

    /// Pool configuration, when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_deref().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(PoolConfig::DEFAULT_MAX_SIZE))
                .with_min_idle(Some(
                    self.pool_min_idle.unwrap_or(PoolConfig::DEFAULT_MIN_IDLE),
                ))
                .with_connection_timeout(
                    self.pool_timeout_secs
                        .map_or(PoolConfig::DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs),
                )
        })
    }
}
