//! Registration endpoint.
//!
//! ```text
//! GET  /register
//! POST /register  [["<aske-id>", "https://a.org/1", "description"]]
//! ```

use actix_web::web::{Bytes, Data};
use actix_web::{HttpRequest, HttpResponse, get, post};
use serde::{Deserialize, Serialize};

use super::api_key::api_key_from;
use super::create::parse_body;
use super::error::{ApiResult, AtEndpoint, success};
use super::help::Endpoint;
use super::state::HttpState;
use crate::domain::AskeId;
use crate::domain::ports::RegisterItem;

/// One registration tuple as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RegisterItemDto {
    /// `[id, location, description]`.
    Described(String, String, String),
    /// `[id, location]`.
    Bare(String, String),
}

impl From<RegisterItemDto> for RegisterItem {
    fn from(dto: RegisterItemDto) -> Self {
        match dto {
            RegisterItemDto::Described(id, location, description) => {
                Self::new(id, location, Some(description))
            }
            RegisterItemDto::Bare(id, location) => Self::new(id, location, None),
        }
    }
}

/// Success payload for a registration batch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Identifiers whose binding was written, in input order.
    pub registered_ids: Vec<AskeId>,
}

/// Describe the registration endpoint.
#[get("/register")]
pub async fn register_help() -> HttpResponse {
    success(Endpoint::Register.help())
}

/// Bind locations to identifiers owned by the caller.
#[post("/register")]
pub async fn register(
    state: Data<HttpState>,
    req: HttpRequest,
    body: Bytes,
) -> ApiResult<HttpResponse> {
    let api_key = api_key_from(&req).at(Endpoint::Register)?;
    let items: Vec<RegisterItemDto> = parse_body(&body).at(Endpoint::Register)?;

    let report = state
        .registration
        .register(&api_key, items.into_iter().map(RegisterItem::from).collect())
        .await
        .at(Endpoint::Register)?;
    Ok(success(RegisterResponse {
        registered_ids: report.into_committed(),
    }))
}
