//! Identity routes: who the caller is, and whether a session is valid.

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::{
    adapters::http::{
        app_state::AppState,
        middleware::{Identity, OptionalIdentity},
    },
    app_error::AppResult,
};

#[derive(Serialize)]
struct MeResponse {
    user_id: String,
    email: String,
    role: String,
}

#[derive(Serialize)]
struct SessionResponse {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/session", get(session))
}

/// GET /api/auth/me
/// Returns the authenticated caller's claims; 401 otherwise.
async fn me(identity: Identity) -> AppResult<impl IntoResponse> {
    Ok(Json(MeResponse {
        user_id: identity.user_id,
        email: identity.email,
        role: identity.role,
    }))
}

/// GET /api/auth/session
/// Unlike `/me`, an anonymous request is a valid answer here, not a 401.
/// A present-but-invalid Authorization header still fails the request.
async fn session(OptionalIdentity(identity): OptionalIdentity) -> Json<SessionResponse> {
    match identity {
        Some(identity) => Json(SessionResponse {
            valid: true,
            user_id: Some(identity.user_id),
            email: Some(identity.email),
            role: Some(identity.role),
        }),
        None => Json(SessionResponse {
            valid: false,
            user_id: None,
            email: None,
            role: None,
        }),
    }
}
