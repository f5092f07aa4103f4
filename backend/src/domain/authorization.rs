//! Key-based authorization shared by the registrant-facing services.
//!
//! Every check goes to the store; nothing here is cached between calls.

use tracing::debug;

use super::ports::{
    IdentifierRepository, IdentifierRepositoryError, RegistrantRepository,
    RegistrantRepositoryError,
};
use super::{ApiKey, AskeId, Error, Registrant, TokenValidationError};

/// Parse the caller-supplied API key.
///
/// # Errors
/// Returns `InvalidApiKey` when the key is absent or not a well-formed token.
///
/// # Examples
/// ```
/// use aske_id::domain::{ErrorCode, parse_api_key};
///
/// let err = parse_api_key(Some("nope")).expect_err("malformed");
/// assert_eq!(err.code(), ErrorCode::InvalidApiKey);
/// ```
pub fn parse_api_key(raw: Option<&str>) -> Result<ApiKey, Error> {
    let Some(raw) = raw else {
        return Err(Error::invalid_api_key("You must specify an API key!"));
    };
    raw.parse::<ApiKey>().map_err(|err| match err {
        TokenValidationError::Empty => Error::invalid_api_key("You must specify an API key!"),
        TokenValidationError::Malformed => Error::invalid_api_key("Provided API key is not valid."),
    })
}

/// Resolve the registrant holding `api_key`.
///
/// # Errors
/// Returns `UnauthorizedKey` for unknown keys and `StoreError` when the
/// directory cannot be read.
pub async fn resolve_registrant<R>(registrants: &R, api_key: &ApiKey) -> Result<Registrant, Error>
where
    R: RegistrantRepository + ?Sized,
{
    let registrant = registrants
        .find_by_api_key(api_key)
        .await
        .map_err(map_registrant_error)?;
    registrant.ok_or_else(|| {
        debug!(key = %api_key.fingerprint(), "api key not recognised");
        Error::unauthorized_key("Provided API key is not allowed to use this service.")
    })
}

/// Whether the registrant holding `api_key` owns `id`.
///
/// # Errors
/// Propagates the store failure unchanged so batch callers can record it
/// against the item.
pub async fn owns<I>(
    identifiers: &I,
    api_key: &ApiKey,
    id: &AskeId,
) -> Result<bool, IdentifierRepositoryError>
where
    I: IdentifierRepository + ?Sized,
{
    identifiers.is_owned_by(api_key, id).await
}

/// Map registrant directory failures onto the domain taxonomy.
pub(crate) fn map_registrant_error(error: RegistrantRepositoryError) -> Error {
    Error::store(format!("registrant directory unavailable: {error}"))
}

/// Map identifier store failures onto the domain taxonomy.
pub(crate) fn map_identifier_error(error: IdentifierRepositoryError) -> Error {
    Error::store(format!("identifier store unavailable: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockIdentifierRepository, MockRegistrantRepository};
    use crate::domain::{ErrorCode, RegistrantId};
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("definitely-not-a-uuid"))]
    fn malformed_keys_are_invalid(#[case] raw: Option<&str>) {
        let err = parse_api_key(raw).expect_err("invalid key");
        assert_eq!(err.code(), ErrorCode::InvalidApiKey);
    }

    #[rstest]
    fn well_formed_key_parses() {
        let key = ApiKey::generate();
        assert_eq!(parse_api_key(Some(&key.expose())), Ok(key));
    }

    #[tokio::test]
    async fn unknown_key_is_unauthorized() {
        let mut registrants = MockRegistrantRepository::new();
        registrants
            .expect_find_by_api_key()
            .times(1)
            .returning(|_| Ok(None));

        let err = resolve_registrant(&registrants, &ApiKey::generate())
            .await
            .expect_err("unknown key");

        assert_eq!(err.code(), ErrorCode::UnauthorizedKey);
    }

    #[tokio::test]
    async fn directory_failure_is_store_error() {
        let mut registrants = MockRegistrantRepository::new();
        registrants
            .expect_find_by_api_key()
            .returning(|_| Err(RegistrantRepositoryError::connection("refused")));

        let err = resolve_registrant(&registrants, &ApiKey::generate())
            .await
            .expect_err("store down");

        assert_eq!(err.code(), ErrorCode::StoreError);
    }

    #[tokio::test]
    async fn known_key_resolves_registrant() {
        let key = ApiKey::generate();
        let expected = Registrant::new(RegistrantId::new(4), "xDD", key);
        let stored = expected.clone();
        let mut registrants = MockRegistrantRepository::new();
        registrants
            .expect_find_by_api_key()
            .withf(move |candidate| *candidate == key)
            .returning(move |_| Ok(Some(stored.clone())));

        let registrant = resolve_registrant(&registrants, &key)
            .await
            .expect("registrant");

        assert_eq!(registrant, expected);
    }

    #[tokio::test]
    async fn owns_delegates_to_the_store_join() {
        let key = ApiKey::generate();
        let id = AskeId::generate();
        let mut identifiers = MockIdentifierRepository::new();
        identifiers
            .expect_is_owned_by()
            .withf(move |k, i| *k == key && *i == id)
            .times(1)
            .returning(|_, _| Ok(true));

        assert_eq!(owns(&identifiers, &key, &id).await, Ok(true));
    }
}
