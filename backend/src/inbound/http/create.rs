//! Single-step creation endpoint.
//!
//! ```text
//! GET  /create
//! POST /create  ["https://a.org/1", ["https://a.org/2", "second"]]
//! ```

use actix_web::web::{Bytes, Data};
use actix_web::{HttpRequest, HttpResponse, get, post};
use serde::{Deserialize, Serialize};

use super::api_key::api_key_from;
use super::error::{ApiResult, AtEndpoint, success};
use super::help::Endpoint;
use super::state::HttpState;
use crate::domain::Error;
use crate::domain::ports::{CreateItem, CreatedIdentifier};

/// One creation item as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CreateItemDto {
    /// A bare location.
    Location(String),
    /// A `[location, description]` pair.
    Described(String, String),
}

impl From<CreateItemDto> for CreateItem {
    fn from(dto: CreateItemDto) -> Self {
        match dto {
            CreateItemDto::Location(location) => Self::location(location),
            CreateItemDto::Described(location, description) => {
                Self::described(location, description)
            }
        }
    }
}

/// Success payload for a creation batch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    /// Committed items, in input order.
    pub registered_ids: Vec<CreatedIdentifier>,
}

pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body)
        .map_err(|err| Error::invalid_body(format!("Request body is not valid: {err}")))
}

/// Describe the creation endpoint.
#[get("/create")]
pub async fn create_help() -> HttpResponse {
    success(Endpoint::Create.help())
}

/// Create identifiers bound to the posted locations.
#[post("/create")]
pub async fn create(
    state: Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> ApiResult<HttpResponse> {
    let api_key = api_key_from(&req).at(Endpoint::Create)?;
    let items: Vec<CreateItemDto> = parse_body(&body).at(Endpoint::Create)?;

    let report = state
        .creation
        .create(&api_key, items.into_iter().map(CreateItem::from).collect())
        .await
        .at(Endpoint::Create)?;
    Ok(success(CreateResponse {
        registered_ids: report.into_committed(),
    }))
}
