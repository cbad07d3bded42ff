//! Runtime settings for the server binary and build-time settings for the
//! browser bundle.
use leptos::logging::{log, warn};

/// Path the review service is mounted at.
pub const DEFAULT_ENDPOINT: &str = "/api/reviews";

pub const DEFAULT_DATABASE_PATH: &str = "reviews.db";

/// Settings compiled into the front end.
///
/// The bundle is public, so the admin code only appears as its SHA-256 hex
/// digest (`REVIEWS_ADMIN_CODE_SHA256`). Without it the admin page refuses
/// every code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub admin_code_sha256: Option<String>,
    /// When false, public submissions only land in the visitor's local list.
    pub remote_submissions: bool,
}

impl ClientConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("REVIEWS_API_URL"),
            option_env!("REVIEWS_ADMIN_CODE_SHA256"),
            option_env!("REVIEWS_LOCAL_SUBMISSIONS"),
        )
    }

    fn from_values(endpoint: Option<&str>, admin_digest: Option<&str>, local_only: Option<&str>) -> Self {
        ClientConfig {
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
            admin_code_sha256: admin_digest
                .map(|digest| digest.trim().to_ascii_lowercase())
                .filter(|digest| !digest.is_empty()),
            remote_submissions: !matches!(local_only, Some("1" | "true")),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

/// Settings read by the server at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_path: String,
    /// `None` disables every admin action.
    pub admin_code: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            var_or("REVIEWS_DB_PATH", DEFAULT_DATABASE_PATH),
            std::env::var("REVIEWS_ADMIN_CODE").ok(),
        )
    }

    fn from_values(database_path: String, admin_code: Option<String>) -> Self {
        let admin_code = admin_code.filter(|code| !code.is_empty());
        if admin_code.is_none() {
            warn!("[CONFIG] REVIEWS_ADMIN_CODE not set, admin actions are disabled");
        }
        ServerConfig {
            database_path,
            admin_code,
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        log!("[CONFIG] {} not set, using default", key);
        default.to_string()
    })
}
