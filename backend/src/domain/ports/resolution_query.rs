//! Driving port for public identifier resolution.

use std::num::NonZeroU32;

use async_trait::async_trait;

use crate::domain::{BibRecord, Error};

/// Keyword selecting the bulk listing.
pub const LOOKUP_ALL: &str = "all";

/// What a lookup resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    /// Every identifier with a bound location, one page at a time.
    All {
        /// One-based page number.
        page: NonZeroU32,
    },
    /// A single identifier, as supplied by the caller.
    One(String),
}

impl LookupTarget {
    /// Interpret lookup request parts.
    ///
    /// `id == "all"` or the `all` flag select the bulk listing.
    ///
    /// # Errors
    /// Returns `MissingIdentifier` when neither an id nor `all` is given and
    /// `InvalidParameter` when `page` is not a positive integer.
    pub fn from_parts(id: Option<&str>, all: bool, page: Option<&str>) -> Result<Self, Error> {
        let id = id.map(str::trim).filter(|value| !value.is_empty());
        if all || id == Some(LOOKUP_ALL) {
            return Ok(Self::All {
                page: parse_page(page)?,
            });
        }
        id.map(|value| Self::One(value.to_owned()))
            .ok_or_else(|| Error::missing_identifier("You must specify an ASKE-ID to look up."))
    }
}

fn parse_page(raw: Option<&str>) -> Result<NonZeroU32, Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(NonZeroU32::MIN),
        Some(value) => value.parse::<NonZeroU32>().map_err(|_| {
            Error::invalid_parameter(format!("page must be a positive integer, got '{value}'"))
        }),
    }
}

/// Use-case port: read-only resolution of identifiers.
#[async_trait]
pub trait ResolutionQuery: Send + Sync {
    /// Resolve `target` into public records.
    async fn lookup(&self, target: LookupTarget) -> Result<Vec<BibRecord>, Error>;
}
