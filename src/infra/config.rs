use std::env;
use std::net::SocketAddr;

use secrecy::SecretString;
use time::Duration;

/// Deployment environment, selected by `ENVIRONMENT` or by the platform's
/// own production flag (`RAILWAY_ENVIRONMENT=production`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        let explicit = env::var("ENVIRONMENT")
            .unwrap_or_default()
            .to_ascii_lowercase();
        if matches!(explicit.as_str(), "production" | "prod") {
            return Self::Production;
        }
        if env::var("RAILWAY_ENVIRONMENT").is_ok_and(|v| v.eq_ignore_ascii_case("production")) {
            return Self::Production;
        }
        Self::Development
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub app_env: AppEnv,
    pub jwt_secret: SecretString,
    pub access_token_ttl: Duration,
    /// Comma-separated operator override for the origin allow-list.
    pub allowed_origins: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let app_env = AppEnv::from_env();

        let jwt_secret =
            SecretString::new(env::var("JWT_SECRET").expect("JWT_SECRET must be set").into());

        // Only HMAC-SHA256 is supported; refuse to start with anything else.
        let algorithm = env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        assert!(algorithm == "HS256", "unsupported JWT_ALGORITHM: {algorithm}");

        let ttl_minutes: i64 = env::var("ACCESS_TOKEN_TTL_MINUTES")
            .unwrap_or("10080".to_string())
            .parse()
            .expect("ACCESS_TOKEN_TTL_MINUTES must be a valid number");

        let port: u16 = env::var("PORT")
            .unwrap_or("8000".to_string())
            .parse()
            .expect("PORT must be a valid number");

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            app_env,
            jwt_secret,
            access_token_ttl: Duration::minutes(ttl_minutes),
            allowed_origins,
        }
    }
}
