//! Browser origin allow-list policy.
//!
//! CORS is enforced by browsers; native mobile apps and server-to-server
//! calls are not restricted by it. The policy is computed once at startup
//! and treated as immutable afterwards, so concurrent reads need no locking.
//! An unmatched origin is not an error: the CORS header is simply omitted
//! and the browser turns that into a network-level failure on its own.

use once_cell::sync::Lazy;
use regex::Regex;

/// Origins that must always be reachable in production, plus the mobile
/// shells, which report custom URI schemes as their origin.
const PRODUCTION_ORIGINS: [&str; 5] = [
    "https://hiremebahamas.com",
    "https://www.hiremebahamas.com",
    "https://hiremebahamas.vercel.app",
    "capacitor://localhost",
    "ionic://localhost",
];

/// Local frontend dev servers at their common ports.
const DEVELOPMENT_ORIGINS: [&str; 8] = [
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:5000",
    "http://localhost:5173",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:8080",
];

static PREVIEW_ORIGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://frontend-[a-z0-9]+-cliffs-projects-a84c76c9\.vercel\.app$")
        .expect("preview origin pattern must compile")
});

/// Whether an origin is a Vercel preview deployment of the frontend.
///
/// HTTPS only; the project hash is lowercase alphanumeric. Used as a
/// secondary allow rule beside the static list.
pub fn matches_preview_pattern(origin: &str) -> bool {
    PREVIEW_ORIGIN.is_match(origin)
}

/// The set of origins a browser may call the API from.
///
/// Ordered, deduplicated; first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPolicy {
    origins: Vec<String>,
    allow_any: bool,
}

impl OriginPolicy {
    /// Compute the policy for the given environment and optional
    /// operator-supplied override list (comma-separated origins).
    pub fn resolve(is_production: bool, override_csv: Option<&str>) -> Self {
        let override_csv = override_csv.map(str::trim).filter(|s| !s.is_empty());

        if is_production {
            Self::resolve_production(override_csv)
        } else {
            Self::resolve_development(override_csv)
        }
    }

    fn resolve_production(override_csv: Option<&str>) -> Self {
        let mut policy = Self {
            origins: Vec::new(),
            allow_any: false,
        };

        match override_csv {
            // A bare wildcard override is rejected outright in production.
            None | Some("*") => {
                policy.extend(PRODUCTION_ORIGINS.iter().map(|s| s.to_string()));
            }
            Some(csv) => {
                for entry in parse_csv(csv) {
                    // The production list never carries a wildcard.
                    if entry == "*" {
                        continue;
                    }
                    policy.insert(upgrade_scheme(entry));
                }
                // Guards against overrides that forget the canonical domains.
                policy.insert("https://hiremebahamas.com".to_string());
                policy.insert("https://www.hiremebahamas.com".to_string());
            }
        }

        policy
    }

    fn resolve_development(override_csv: Option<&str>) -> Self {
        let mut policy = Self {
            origins: Vec::new(),
            allow_any: false,
        };
        policy.extend(PRODUCTION_ORIGINS.iter().map(|s| s.to_string()));
        policy.extend(DEVELOPMENT_ORIGINS.iter().map(|s| s.to_string()));

        if let Some(csv) = override_csv {
            // Development overrides are taken as-is, not normalized; an
            // explicit "*" turns the policy into allow-any.
            for entry in parse_csv(csv) {
                if entry == "*" {
                    policy.allow_any = true;
                } else {
                    policy.insert(entry);
                }
            }
        }

        policy
    }

    /// Whether a candidate origin may call the API.
    pub fn allows(&self, origin: &str) -> bool {
        self.allow_any
            || self.origins.iter().any(|o| o == origin)
            || matches_preview_pattern(origin)
    }

    /// True when the policy is the explicit wildcard. Callers must never
    /// combine this with credentialed CORS.
    pub fn allows_any(&self) -> bool {
        self.allow_any
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    fn insert(&mut self, origin: String) {
        if !self.origins.contains(&origin) {
            self.origins.push(origin);
        }
    }

    fn extend(&mut self, iter: impl IntoIterator<Item = String>) {
        for origin in iter {
            self.insert(origin);
        }
    }
}

fn parse_csv(csv: &str) -> impl Iterator<Item = String> + '_ {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn upgrade_scheme(origin: String) -> String {
    match origin.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => origin,
    }
}
