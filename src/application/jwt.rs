use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::app_error::{AppError, AppResult, AuthError};

/// Claims carried inside an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,

    pub email: String,

    /// Role name (e.g., "user", "admin")
    pub role: String,

    /// Token expiration (Unix timestamp)
    pub exp: i64,

    /// Token issued at (Unix timestamp)
    pub iat: i64,
}

/// Issue a signed access token for the given subject.
///
/// `exp` is set to now + ttl; signing is pure CPU work with no side effects.
pub fn issue(
    sub: &str,
    email: &str,
    role: &str,
    secret: &secrecy::SecretString,
    ttl: Duration,
) -> AppResult<String> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        iat: now,
        exp: now + ttl.whole_seconds(),
    };
    sign(&claims, secret)
}

pub(crate) fn sign(claims: &Claims, secret: &secrecy::SecretString) -> AppResult<String> {
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

/// Verify a token and return its claims unchanged.
pub fn verify(token: &str, secret: &secrecy::SecretString) -> Result<Claims, AuthError> {
    // Expiry is compared against wall-clock UTC with no leeway.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::MalformedCredentials,
    })
}
