//! Reservation endpoint.
//!
//! ```text
//! GET  /reserve
//! POST /reserve?n=2   (x-api-key: <key>)
//! ```

use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse, get, post};
use serde::{Deserialize, Serialize};

use super::api_key::api_key_from;
use super::error::{ApiResult, AtEndpoint, success};
use super::help::Endpoint;
use super::parse_query;
use super::state::HttpState;
use crate::domain::AskeId;

#[derive(Debug, Deserialize)]
struct ReserveQuery {
    n: Option<String>,
}

/// Success payload for a reservation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveResponse {
    /// Newly reserved identifiers.
    pub reserved_ids: Vec<AskeId>,
}

/// Describe the reservation endpoint.
#[get("/reserve")]
pub async fn reserve_help() -> HttpResponse {
    success(Endpoint::Reserve.help())
}

/// Reserve `n` unbound identifiers for the caller.
#[post("/reserve")]
pub async fn reserve(state: Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let api_key = api_key_from(&req).at(Endpoint::Reserve)?;
    let query: ReserveQuery = parse_query(&req).at(Endpoint::Reserve)?;

    let reserved_ids = state
        .reservation
        .reserve(&api_key, query.n.as_deref())
        .await
        .at(Endpoint::Reserve)?;
    Ok(success(ReserveResponse { reserved_ids }))
}
