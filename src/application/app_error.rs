use thiserror::Error;

/// Authentication failures, distinguished for server-side logging only.
///
/// Clients see every variant as the same generic 401 so the response cannot
/// be used as a verification oracle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingCredentials,

    #[error("malformed Authorization header or token")]
    MalformedCredentials,

    #[error("token has expired")]
    ExpiredToken,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token carries no subject claim")]
    MissingSubjectClaim,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Unauthenticated(#[from] AuthError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    Unauthorized,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
