//! Client configuration.
//!
//! The bundle runs inside the browser, so there is no process environment at
//! runtime. Values are taken from the build environment and fall back to a
//! local development server.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8081";
const DEFAULT_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin, without the `/api` or `/admin` prefix.
    pub server_url: String,
    /// localStorage key holding the bearer token.
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL, DEFAULT_TOKEN_KEY)
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>, token_key: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self {
            server_url,
            token_key: token_key.into(),
        }
    }

    /// Reads `PHOTO_SHARE_SERVER` and `PHOTO_SHARE_TOKEN_KEY` at build time.
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("PHOTO_SHARE_SERVER").unwrap_or(DEFAULT_SERVER_URL),
            option_env!("PHOTO_SHARE_TOKEN_KEY").unwrap_or(DEFAULT_TOKEN_KEY),
        )
    }

    /// Data endpoints, e.g. `api_url("/user/list")`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.server_url, normalize_path(path))
    }

    /// Session endpoints, e.g. `admin_url("/current")`.
    pub fn admin_url(&self, path: &str) -> String {
        format!("{}/admin{}", self.server_url, normalize_path(path))
    }
}

fn normalize_path(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
