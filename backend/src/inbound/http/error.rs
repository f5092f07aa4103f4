//! Response envelopes for the registry API.
//!
//! Success bodies are `{"success": <payload>}`. Failures are
//! `{"error": {"message", "v", "about"}}` where `about` is the help document
//! of the endpoint that failed. Both are sent with status 200.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use super::help::{API_VERSION, Endpoint};
use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

const STORE_UNAVAILABLE: &str = "The registry store is temporarily unavailable.";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// A domain error tied to the endpoint that raised it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    error: Error,
    endpoint: Endpoint,
}

impl ApiError {
    /// Pair `error` with `endpoint`.
    pub fn new(error: Error, endpoint: Endpoint) -> Self {
        Self { error, endpoint }
    }

    /// The wrapped domain error.
    pub fn error(&self) -> &Error {
        &self.error
    }

    fn public_message(&self) -> &str {
        if self.error.code() == ErrorCode::StoreError {
            STORE_UNAVAILABLE
        } else {
            self.error.message()
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    v: u32,
    about: Value,
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct SuccessEnvelope<T> {
    success: T,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::OK
    }

    fn error_response(&self) -> HttpResponse {
        if self.error.code() == ErrorCode::StoreError {
            error!(
                trace_id = ?TraceId::current().map(|id| id.to_string()),
                endpoint = self.endpoint.path(),
                error = %self.error,
                "store failure"
            );
        }
        HttpResponse::build(self.status_code()).json(ErrorEnvelope {
            error: ErrorBody {
                message: self.public_message(),
                v: API_VERSION,
                about: self.endpoint.help(),
            },
        })
    }
}

/// Attach an endpoint to domain failures.
pub trait AtEndpoint<T> {
    /// Convert the error side into an [`ApiError`] for `endpoint`.
    fn at(self, endpoint: Endpoint) -> ApiResult<T>;
}

impl<T> AtEndpoint<T> for Result<T, Error> {
    fn at(self, endpoint: Endpoint) -> ApiResult<T> {
        self.map_err(|error| ApiError::new(error, endpoint))
    }
}

/// Wrap `payload` in the success envelope.
pub fn success<T: Serialize>(payload: T) -> HttpResponse {
    HttpResponse::Ok().json(SuccessEnvelope { success: payload })
}
