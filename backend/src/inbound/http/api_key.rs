//! API key extraction.
//!
//! The `x-api-key` header takes precedence over the `api_key` query
//! parameter.

use actix_web::HttpRequest;
use actix_web::web::Query;
use serde::Deserialize;

use crate::domain::{ApiKey, Error, parse_api_key};

/// Header carrying the registrant key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Default, Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

fn raw_api_key(req: &HttpRequest) -> Option<String> {
    if let Some(value) = req.headers().get(API_KEY_HEADER) {
        // A present header is authoritative even when it is not valid UTF-8.
        return Some(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Query::<ApiKeyQuery>::from_query(req.query_string())
        .ok()
        .and_then(|query| query.into_inner().api_key)
}

/// Read and validate the caller's API key.
///
/// # Errors
/// Returns `InvalidApiKey` when no key is present or it is malformed.
pub fn api_key_from(req: &HttpRequest) -> Result<ApiKey, Error> {
    parse_api_key(raw_api_key(req).as_deref())
}
