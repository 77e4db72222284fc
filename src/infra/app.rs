use axum::{Router, http};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::{
    adapters::http::{app_state::AppState, routes},
    application::origin_policy::OriginPolicy,
    infra::setup::init_tracing,
};

pub fn create_app(app_state: AppState) -> Router {
    init_tracing();

    let policy = OriginPolicy::resolve(
        app_state.config.app_env.is_production(),
        app_state.config.allowed_origins.as_deref(),
    );

    Router::new()
        .merge(routes::router())
        .with_state(app_state)
        .layer(cors_layer(policy))
        .layer(SetResponseHeaderLayer::if_not_present(
            http::header::X_CONTENT_TYPE_OPTIONS,
            http::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            http::header::X_FRAME_OPTIONS,
            http::HeaderValue::from_static("DENY"),
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &http::Request<_>| {
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http-request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                    request_id = %request_id
                )
            }),
        )
}

/// A wildcard policy must never be combined with credentials, so the two
/// cases build different layers.
fn cors_layer(policy: OriginPolicy) -> CorsLayer {
    let cors = if policy.allows_any() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let allow_origin = AllowOrigin::predicate(move |origin: &http::HeaderValue, _| {
            origin.to_str().map(|o| policy.allows(o)).unwrap_or(false)
        });
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_credentials(true)
    };

    cors.allow_methods([
        http::Method::GET,
        http::Method::POST,
        http::Method::PATCH,
        http::Method::DELETE,
    ])
    .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use secrecy::SecretString;
    use time::Duration;

    use super::*;
    use crate::infra::config::{AppConfig, AppEnv};

    fn test_state(app_env: AppEnv, allowed_origins: Option<&str>) -> AppState {
        AppState {
            config: Arc::new(AppConfig {
                bind_addr: ([127, 0, 0, 1], 0).into(),
                app_env,
                jwt_secret: SecretString::new("app-test-secret".into()),
                access_token_ttl: Duration::days(7),
                allowed_origins: allowed_origins.map(str::to_string),
            }),
        }
    }

    #[tokio::test]
    async fn health_is_public() {
        let server = TestServer::new(create_app(test_state(AppEnv::Development, None))).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn allowed_origin_is_echoed_back() {
        let server = TestServer::new(create_app(test_state(AppEnv::Production, None))).unwrap();

        let response = server
            .get("/health")
            .add_header("Origin", "https://hiremebahamas.com")
            .await;

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.as_bytes()),
            Some("https://hiremebahamas.com".as_bytes())
        );
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-credentials")
                .map(|v| v.as_bytes()),
            Some("true".as_bytes())
        );
    }

    #[tokio::test]
    async fn preview_origin_is_echoed_back() {
        let server = TestServer::new(create_app(test_state(AppEnv::Production, None))).unwrap();

        let origin = "https://frontend-ab12cd-cliffs-projects-a84c76c9.vercel.app";
        let response = server.get("/health").add_header("Origin", origin).await;

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.as_bytes()),
            Some(origin.as_bytes())
        );
    }

    #[tokio::test]
    async fn unknown_origin_gets_no_cors_header() {
        let server = TestServer::new(create_app(test_state(AppEnv::Production, None))).unwrap();

        let response = server
            .get("/health")
            .add_header("Origin", "https://evil.com")
            .await;

        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );
    }

    #[tokio::test]
    async fn wildcard_dev_override_disables_credentials() {
        let server =
            TestServer::new(create_app(test_state(AppEnv::Development, Some("*")))).unwrap();

        let response = server
            .get("/health")
            .add_header("Origin", "https://anything.example")
            .await;

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.as_bytes()),
            Some("*".as_bytes())
        );
        assert!(
            response
                .headers()
                .get("access-control-allow-credentials")
                .is_none()
        );
    }

    #[tokio::test]
    async fn security_headers_are_present() {
        let server = TestServer::new(create_app(test_state(AppEnv::Development, None))).unwrap();

        let response = server.get("/health").await;

        assert_eq!(
            response
                .headers()
                .get("x-content-type-options")
                .map(|v| v.as_bytes()),
            Some("nosniff".as_bytes())
        );
        assert_eq!(
            response
                .headers()
                .get("x-frame-options")
                .map(|v| v.as_bytes()),
            Some("DENY".as_bytes())
        );
    }
}
