//! Per-request authentication gate.
//!
//! Extracts the bearer token from the Authorization header, delegates
//! verification to `application::jwt` and exposes the verified claims to
//! handlers through the `Identity` / `OptionalIdentity` extractors. Every
//! failure is recovered here and converted into a 401 before any handler
//! logic runs.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AuthError},
    application::jwt,
};

/// Claims of a verified request. Lives only for the request that carried
/// the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

// Scheme prefix is case-sensitive, trailing space included.
const BEARER_PREFIX: &str = "Bearer ";

pub fn authenticate(headers: &HeaderMap, secret: &SecretString) -> Result<Identity, AuthError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;
    let header = header.to_str().map_err(|_| AuthError::MalformedCredentials)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedCredentials)?;

    let claims = jwt::verify(token, secret)?;
    if claims.sub.is_empty() {
        return Err(AuthError::MissingSubjectClaim);
    }

    Ok(Identity {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

/// Like `authenticate`, but an absent Authorization header is an anonymous
/// request, not a failure. A present-but-invalid header still fails.
pub fn authenticate_optional(
    headers: &HeaderMap,
    secret: &SecretString,
) -> Result<Option<Identity>, AuthError> {
    if !headers.contains_key(header::AUTHORIZATION) {
        return Ok(None);
    }
    authenticate(headers, secret).map(Some)
}

impl<S> FromRequestParts<S> for Identity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let identity = authenticate(&parts.headers, &app_state.config.jwt_secret)?;
        Ok(identity)
    }
}

pub struct OptionalIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for OptionalIdentity
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let identity = authenticate_optional(&parts.headers, &app_state.config.jwt_secret)?;
        Ok(OptionalIdentity(identity))
    }
}
