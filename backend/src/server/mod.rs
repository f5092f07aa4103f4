//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, HttpServer, web};
use tracing::info;

use aske_id::Trace;
use aske_id::inbound::http::{configure, unmatched};
use aske_id::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    url_prefix: String,
    cors_allowed_origins: Vec<String>,
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        url_prefix,
        cors_allowed_origins,
    } = deps;

    App::new()
        .app_data(http_state)
        .wrap(NormalizePath::new(TrailingSlash::Trim))
        .wrap(build_cors(&cors_allowed_origins))
        .wrap(Trace)
        .service(web::scope(&url_prefix).configure(configure))
        .default_service(web::to(unmatched))
}

/// Construct an Actix HTTP server from `config`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails or the seed
/// registrant cannot be stored.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let ServerConfig {
        bind_addr,
        url_prefix,
        cors_allowed_origins,
        ..
    } = config;

    info!(%bind_addr, prefix = %url_prefix, "starting registry server");
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            http_state: http_state.clone(),
            url_prefix: url_prefix.clone(),
            cors_allowed_origins: cors_allowed_origins.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
