//! Handler tests against the in-memory registry.

use std::num::NonZeroU32;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::api_key::API_KEY_HEADER;
use super::configure;
use super::help::{Endpoint, unmatched};
use super::state::HttpState;
use crate::domain::{ReservationPolicy, Registrant};
use crate::outbound::memory::InMemoryRegistry;

fn test_app(
    registry: Arc<InMemoryRegistry>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::from_repositories(
        Arc::clone(&registry),
        registry,
        ReservationPolicy::default(),
        NonZeroU32::new(2).expect("non-zero"),
    );
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
        .default_service(web::to(unmatched))
}

fn registry_with_registrant() -> (Arc<InMemoryRegistry>, Registrant) {
    let registry = Arc::new(InMemoryRegistry::new());
    let registrant = registry.add_registrant("xDD").expect("registrant");
    (registry, registrant)
}

async fn call(
    registry: &Arc<InMemoryRegistry>,
    request: actix_test::TestRequest,
) -> Value {
    let app = actix_test::init_service(test_app(Arc::clone(registry))).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    actix_test::read_body_json(response).await
}

fn keyed(request: actix_test::TestRequest, registrant: &Registrant) -> actix_test::TestRequest {
    request.insert_header((API_KEY_HEADER, registrant.api_key().expose()))
}

fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .expect("array")
        .iter()
        .map(|item| item.as_str().expect("string").to_owned())
        .collect()
}

fn error_message(body: &Value) -> &str {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .expect("error message")
}

#[actix_web::test]
async fn reserve_returns_the_requested_number_of_ids() {
    let (registry, xdd) = registry_with_registrant();

    let body = call(
        &registry,
        keyed(actix_test::TestRequest::post().uri("/reserve?n=2"), &xdd),
    )
    .await;

    assert_eq!(strings(body.pointer("/success/reservedIds")).len(), 2);
    assert_eq!(registry.identifier_count(), 2);
}

#[actix_web::test]
async fn reserve_accepts_the_key_as_a_query_parameter() {
    let (registry, xdd) = registry_with_registrant();
    let uri = format!("/reserve?api_key={}", xdd.api_key().expose());

    let body = call(&registry, actix_test::TestRequest::post().uri(&uri)).await;

    assert_eq!(strings(body.pointer("/success/reservedIds")).len(), 10);
}

#[rstest]
#[case(None, "You must specify an API key!")]
#[case(Some("garbage"), "Provided API key is not valid.")]
#[case(
    Some("6f1c3c3e-2a5b-4c8e-9d51-0f7f7c2b7a10"),
    "Provided API key is not allowed to use this service."
)]
#[actix_web::test]
async fn reserve_rejects_bad_keys_with_help(#[case] key: Option<&str>, #[case] message: &str) {
    let (registry, _) = registry_with_registrant();
    let mut request = actix_test::TestRequest::post().uri("/reserve?n=2");
    if let Some(key) = key {
        request = request.insert_header((API_KEY_HEADER, key));
    }

    let body = call(&registry, request).await;

    assert_eq!(error_message(&body), message);
    assert_eq!(body.pointer("/error/v"), Some(&json!(1)));
    assert_eq!(body.pointer("/error/about"), Some(&Endpoint::Reserve.help()));
    assert_eq!(registry.identifier_count(), 0);
}

#[actix_web::test]
async fn reserve_rejects_malformed_counts() {
    let (registry, xdd) = registry_with_registrant();

    let body = call(
        &registry,
        keyed(actix_test::TestRequest::post().uri("/reserve?n=lots"), &xdd),
    )
    .await;

    assert!(error_message(&body).contains("n must be a non-negative integer"));
    assert_eq!(registry.identifier_count(), 0);
}

#[actix_web::test]
async fn reserve_rejects_a_repeated_count() {
    let (registry, xdd) = registry_with_registrant();

    let body = call(
        &registry,
        keyed(actix_test::TestRequest::post().uri("/reserve?n=2&n=3"), &xdd),
    )
    .await;

    assert!(error_message(&body).starts_with("Query string is not valid"));
    assert_eq!(body.pointer("/error/about"), Some(&Endpoint::Reserve.help()));
    assert_eq!(registry.identifier_count(), 0);
}

#[rstest]
#[case("/id?aske_id=a&aske_id=b")]
#[case("/id?all&page=1&page=2")]
#[actix_web::test]
async fn lookup_rejects_repeated_parameters(#[case] uri: &str) {
    let registry = Arc::new(InMemoryRegistry::new());

    let body = call(&registry, actix_test::TestRequest::get().uri(uri)).await;

    assert!(error_message(&body).starts_with("Query string is not valid"));
    assert_eq!(body.pointer("/error/about"), Some(&Endpoint::Lookup.help()));
}

#[rstest]
#[case(actix_test::TestRequest::put().uri("/reserve"), "No route for PUT /reserve.")]
#[case(actix_test::TestRequest::get().uri("/nowhere"), "No route for GET /nowhere.")]
#[case(actix_test::TestRequest::delete().uri("/"), "No route for DELETE /.")]
#[actix_web::test]
async fn unrouted_requests_get_the_error_envelope(
    #[case] request: actix_test::TestRequest,
    #[case] message: &str,
) {
    let registry = Arc::new(InMemoryRegistry::new());

    let body = call(&registry, request).await;

    assert_eq!(error_message(&body), message);
    assert_eq!(body.pointer("/error/v"), Some(&json!(1)));
    assert_eq!(body.pointer("/error/about"), Some(&Endpoint::Index.help()));
}

#[rstest]
#[case("/reserve", Endpoint::Reserve)]
#[case("/create", Endpoint::Create)]
#[case("/register", Endpoint::Register)]
#[actix_web::test]
async fn get_on_write_endpoints_returns_help(#[case] uri: &str, #[case] endpoint: Endpoint) {
    let registry = Arc::new(InMemoryRegistry::new());

    let body = call(&registry, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(body.get("success"), Some(&endpoint.help()));
}

#[actix_web::test]
async fn index_lists_routes() {
    let registry = Arc::new(InMemoryRegistry::new());

    let body = call(&registry, actix_test::TestRequest::get().uri("/")).await;

    assert!(body.pointer("/success/routes/~1reserve").is_some());
    assert_eq!(body.pointer("/success/v"), Some(&json!(1)));
}

#[actix_web::test]
async fn create_mirrors_the_input_shape() {
    let (registry, xdd) = registry_with_registrant();

    let body = call(
        &registry,
        keyed(actix_test::TestRequest::post().uri("/create"), &xdd)
            .set_json(json!(["http://a", ["http://b", "second"], "not a uri"])),
    )
    .await;

    let registered = body
        .pointer("/success/registeredIds")
        .and_then(Value::as_array)
        .expect("registeredIds");
    assert_eq!(registered.len(), 2);
    assert_eq!(registered[0].as_array().map(Vec::len), Some(2));
    assert_eq!(registered[0][1], json!("http://a"));
    assert_eq!(registered[1][1], json!("http://b"));
    assert_eq!(registered[1][2], json!("second"));
    assert_eq!(registry.identifier_count(), 2);
}

#[rstest]
#[case("/create", "{\"not\": \"an array\"}")]
#[case("/create", "[1, 2]")]
#[case("/register", "[[\"only-one\"]]")]
#[case("/register", "")]
#[actix_web::test]
async fn undeserializable_bodies_abort_the_request(#[case] uri: &str, #[case] payload: &str) {
    let (registry, xdd) = registry_with_registrant();

    let body = call(
        &registry,
        keyed(actix_test::TestRequest::post().uri(uri), &xdd)
            .insert_header(("content-type", "application/json"))
            .set_payload(payload.to_owned()),
    )
    .await;

    assert!(error_message(&body).starts_with("Request body is not valid"));
    assert_eq!(registry.identifier_count(), 0);
}

async fn reserve_ids(registry: &Arc<InMemoryRegistry>, registrant: &Registrant, n: u32) -> Vec<String> {
    let body = call(
        registry,
        keyed(
            actix_test::TestRequest::post().uri(&format!("/reserve?n={n}")),
            registrant,
        ),
    )
    .await;
    strings(body.pointer("/success/reservedIds"))
}

#[actix_web::test]
async fn register_then_lookup_sees_the_last_write() {
    let (registry, xdd) = registry_with_registrant();
    let ids = reserve_ids(&registry, &xdd, 2).await;
    let a = ids[0].clone();

    let registered = call(
        &registry,
        keyed(actix_test::TestRequest::post().uri("/register"), &xdd).set_json(json!([
            [a, "http://x", ""],
            [a, "http://y", "d"]
        ])),
    )
    .await;
    assert_eq!(strings(registered.pointer("/success/registeredIds")), vec![a.clone(), a.clone()]);

    let found = call(&registry, actix_test::TestRequest::get().uri(&format!("/id/{a}"))).await;
    let record = found.pointer("/success/objects/0").expect("record");
    assert_eq!(record.pointer("/identifier/0/type"), Some(&json!("_aske-id")));
    assert_eq!(record.pointer("/identifier/0/id"), Some(&json!(a)));
    assert_eq!(record.pointer("/link/0/url"), Some(&json!("http://y")));
    assert_eq!(record.pointer("/metadata/description"), Some(&json!("d")));
    assert_eq!(record.get("registrant"), Some(&json!("xDD")));
}

#[actix_web::test]
async fn register_omits_ids_owned_by_someone_else() {
    let (registry, xdd) = registry_with_registrant();
    let other = registry.add_registrant("other").expect("registrant");
    let theirs = reserve_ids(&registry, &other, 1).await.remove(0);

    let registered = call(
        &registry,
        keyed(actix_test::TestRequest::post().uri("/register"), &xdd)
            .set_json(json!([[theirs, "http://hijack"]])),
    )
    .await;
    assert!(strings(registered.pointer("/success/registeredIds")).is_empty());

    let found = call(
        &registry,
        actix_test::TestRequest::get().uri(&format!("/id?aske_id={theirs}")),
    )
    .await;
    assert_eq!(found.pointer("/success/objects/0/link/0/url"), Some(&Value::Null));
}

#[rstest]
#[case("/id/all")]
#[case("/id?all")]
#[actix_web::test]
async fn bulk_lookup_lists_only_bound_ids(#[case] uri: &str) {
    let (registry, xdd) = registry_with_registrant();
    let ids = reserve_ids(&registry, &xdd, 3).await;
    call(
        &registry,
        keyed(actix_test::TestRequest::post().uri("/register"), &xdd)
            .set_json(json!([[ids[0], "http://one"]])),
    )
    .await;

    let body = call(&registry, actix_test::TestRequest::get().uri(uri)).await;

    let objects = body
        .pointer("/success/objects")
        .and_then(Value::as_array)
        .expect("objects");
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].pointer("/identifier/0/id"), Some(&json!(ids[0])));
}

#[rstest]
#[case("/id/not-a-token", "No ASKE-ID found with that identifier.")]
#[case("/id?id=6f1c3c3e-2a5b-4c8e-9d51-0f7f7c2b7a10", "No ASKE-ID found with that identifier.")]
#[case("/id", "You must specify an ASKE-ID to look up.")]
#[case("/id?all&page=0", "page must be a positive integer, got '0'")]
#[actix_web::test]
async fn lookup_failures_carry_lookup_help(#[case] uri: &str, #[case] message: &str) {
    let registry = Arc::new(InMemoryRegistry::new());

    let body = call(&registry, actix_test::TestRequest::get().uri(uri)).await;

    assert_eq!(error_message(&body), message);
    assert_eq!(body.pointer("/error/about"), Some(&Endpoint::Lookup.help()));
}
