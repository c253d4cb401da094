//! Configuration management for apiquery

use std::path::PathBuf;
use std::time::Duration;

use crate::cookies::CookieJar;

/// Output configuration
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub file: Option<PathBuf>,
    pub pretty: bool,
}

/// Transport configuration shared by every request an [`crate::http::ApiClient`] sends
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL relative routes are resolved against
    pub base_url: Option<String>,
    /// Headers added to every request, before per-request headers
    pub headers: Vec<(String, String)>,
    pub user_agent: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Sent as `Authorization: Bearer <token>`
    pub bearer_token: Option<String>,
    pub auth_username: Option<String>,
    pub auth_password: Option<String>,
    /// Sent as the `Cookie` header
    pub cookies: Option<CookieJar>,
    pub verify_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: None,
            headers: Vec::new(),
            user_agent: Some(format!("apiquery/{}", crate::VERSION)),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            bearer_token: None,
            auth_username: None,
            auth_password: None,
            cookies: None,
            verify_certs: true,
        }
    }
}
