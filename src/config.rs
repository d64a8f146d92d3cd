use std::env;
use url::Url;

/// Default public Cinemeta instance
const DEFAULT_CINEMETA_URL: &str = "https://v3-cinemeta.strem.io";

/// Default Moviebox API endpoint; deployments point this at their own mirror
const DEFAULT_MOVIEBOX_URL: &str = "https://api.moviebox.example";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Collaborators
    pub cinemeta_url: String,
    pub moviebox_url: String,
    pub index_timeout_secs: u64,

    // Misc
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "7700".to_string())
                .parse()
                .unwrap_or(7700),

            // Collaborators
            cinemeta_url: normalize_base_url(
                &env::var("CINEMETA_URL").unwrap_or_else(|_| DEFAULT_CINEMETA_URL.to_string()),
            ),
            moviebox_url: normalize_base_url(
                &env::var("MOVIEBOX_URL").unwrap_or_else(|_| DEFAULT_MOVIEBOX_URL.to_string()),
            ),
            index_timeout_secs: env::var("INDEX_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            // Misc
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| format!("MovieboxAddon/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Canonicalize a collaborator base URL so path concatenation is uniform
fn normalize_base_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => url.as_str().trim_end_matches('/').to_string(),
        Err(_) => raw.trim_end_matches('/').to_string(),
    }
}
