//! HTTP inbound adapter exposing the registry API.

pub mod api_key;
pub mod create;
pub mod error;
pub mod help;
pub mod lookup;
pub mod register;
pub mod reserve;
pub mod state;

use actix_web::HttpRequest;
use actix_web::web::{self, Query, ServiceConfig};
use serde::de::DeserializeOwned;

pub use error::{ApiError, ApiResult};
pub use help::unmatched;

use crate::domain::Error;

/// Deserialize the query string.
///
/// # Errors
/// Repeated or ill-typed parameters yield `InvalidParameter`.
pub(crate) fn parse_query<T: DeserializeOwned>(req: &HttpRequest) -> Result<T, Error> {
    Query::<T>::from_query(req.query_string())
        .map(Query::into_inner)
        .map_err(|err| Error::invalid_parameter(format!("Query string is not valid: {err}")))
}

/// Register every registry route on `cfg`.
///
/// The index answers on both the bare mount point and its trailing-slash
/// form so it stays reachable under a scope prefix. Pair it with
/// [`unmatched`] as the app's default service so unrouted requests also get
/// the error envelope.
///
/// ```
/// use actix_web::{App, web};
/// use aske_id::inbound::http::{configure, unmatched};
///
/// let _app = App::new()
///     .service(web::scope("/registry").configure(configure))
///     .default_service(web::to(unmatched));
/// ```
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        web::resource(["", "/"])
            .route(web::get().to(help::index))
            .default_service(web::to(help::unmatched)),
    )
        .service(reserve::reserve_help)
        .service(reserve::reserve)
        .service(create::create_help)
        .service(create::create)
        .service(register::register_help)
        .service(register::register)
        .service(lookup::lookup_query)
        .service(lookup::lookup_path);
}

#[cfg(test)]
mod tests;
