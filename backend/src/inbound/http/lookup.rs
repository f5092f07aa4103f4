//! Public lookup endpoint.
//!
//! ```text
//! GET /id/<aske-id>
//! GET /id?aske_id=<aske-id>
//! GET /id?all&page=2
//! ```

use actix_web::web::{Data, Path};
use actix_web::{HttpRequest, HttpResponse, get};
use serde::{Deserialize, Serialize};

use super::error::{ApiResult, AtEndpoint, success};
use super::help::Endpoint;
use super::parse_query;
use super::state::HttpState;
use crate::domain::BibRecord;
use crate::domain::ports::LookupTarget;

#[derive(Debug, Deserialize)]
struct LookupQuery {
    aske_id: Option<String>,
    id: Option<String>,
    all: Option<String>,
    page: Option<String>,
}

/// Success payload for a lookup.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    /// Resolved records.
    pub objects: Vec<BibRecord>,
}

async fn resolve(state: &HttpState, target: LookupTarget) -> ApiResult<HttpResponse> {
    let objects = state.resolution.lookup(target).await.at(Endpoint::Lookup)?;
    Ok(success(LookupResponse { objects }))
}

/// Resolve the identifier named in the query string.
#[get("/id")]
pub async fn lookup_query(state: Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    let query: LookupQuery = parse_query(&req).at(Endpoint::Lookup)?;
    let id = query.aske_id.as_deref().or(query.id.as_deref());
    let target =
        LookupTarget::from_parts(id, query.all.is_some(), query.page.as_deref()).at(Endpoint::Lookup)?;
    resolve(&state, target).await
}

/// Resolve the identifier named in the path.
#[get("/id/{id}")]
pub async fn lookup_path(
    state: Data<HttpState>,
    path: Path<String>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let query: LookupQuery = parse_query(&req).at(Endpoint::Lookup)?;
    let target = LookupTarget::from_parts(Some(path.as_str()), false, query.page.as_deref())
        .at(Endpoint::Lookup)?;
    resolve(&state, target).await
}
