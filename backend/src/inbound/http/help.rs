//! Endpoint help documents and the service index.
//!
//! Help documents are returned by `GET` on each write endpoint and embedded
//! as `about` in every error envelope.

use actix_web::{HttpRequest, HttpResponse};
use serde_json::{Value, json};

use super::error::{ApiError, ApiResult, success};
use crate::domain::Error;

/// Version reported as `v` in every envelope.
pub const API_VERSION: u32 = 1;

/// Routes exposed by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /`.
    Index,
    /// `/reserve`.
    Reserve,
    /// `/create`.
    Create,
    /// `/register`.
    Register,
    /// `/id`.
    Lookup,
}

impl Endpoint {
    const DOCUMENTED: [Self; 4] = [Self::Reserve, Self::Create, Self::Register, Self::Lookup];

    /// Route path relative to the mount prefix.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Index => "/",
            Self::Reserve => "/reserve",
            Self::Create => "/create",
            Self::Register => "/register",
            Self::Lookup => "/id",
        }
    }

    /// Help document describing this endpoint.
    pub fn help(self) -> Value {
        match self {
            Self::Index => index_document(),
            Self::Reserve => json!({
                "description": "Reserve a batch of unbound ASKE-IDs for later registration.",
                "methods": ["GET", "POST"],
                "parameters": {
                    "api_key": "Registrant API key. May be sent as the x-api-key header instead.",
                    "n": "Number of ASKE-IDs to reserve. Defaults to 10."
                },
                "body": null,
                "example": "POST /reserve?n=2 with header x-api-key: <key>"
            }),
            Self::Create => json!({
                "description": "Create ASKE-IDs already bound to locations.",
                "methods": ["GET", "POST"],
                "parameters": {
                    "api_key": "Registrant API key. May be sent as the x-api-key header instead."
                },
                "body": "JSON array of location strings, or of [location, description] pairs.",
                "example": "[\"https://example.org/doc/1\", [\"https://example.org/doc/2\", \"A document\"]]"
            }),
            Self::Register => json!({
                "description": "Bind locations to ASKE-IDs previously reserved with the same key.",
                "methods": ["GET", "POST"],
                "parameters": {
                    "api_key": "Registrant API key. May be sent as the x-api-key header instead."
                },
                "body": "JSON array of [id, location] or [id, location, description] tuples.",
                "example": "[[\"<aske-id>\", \"https://example.org/doc/1\", \"A document\"]]"
            }),
            Self::Lookup => json!({
                "description": "Resolve an ASKE-ID, or list every bound ASKE-ID.",
                "methods": ["GET"],
                "parameters": {
                    "aske_id": "Identifier to resolve; also accepted as id or as /id/<id>.",
                    "all": "List every ASKE-ID with a location; also accepted as /id/all.",
                    "page": "Page of the listing to return. Defaults to 1."
                },
                "body": null,
                "example": "GET /id/<aske-id>"
            }),
        }
    }
}

fn index_document() -> Value {
    let routes: serde_json::Map<String, Value> = Endpoint::DOCUMENTED
        .iter()
        .map(|endpoint| (endpoint.path().to_owned(), endpoint.help()))
        .collect();
    json!({
        "description": "ASKE-ID registry: reserve, register and resolve persistent identifiers.",
        "v": API_VERSION,
        "routes": routes,
    })
}

/// Service index listing every route with its help document.
pub async fn index() -> HttpResponse {
    success(Endpoint::Index.help())
}

/// Fallback for unrouted requests; the service index rides along as `about`.
pub async fn unmatched(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(ApiError::new(
        Error::route_not_found(format!("No route for {} {}.", req.method(), req.path())),
        Endpoint::Index,
    ))
}
