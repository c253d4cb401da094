//! HTTP authentication utilities

use crate::error::{ApiError, Result};
use base64::Engine;

/// Authentication helper
pub struct Auth;

impl Auth {
    /// Create basic auth header value
    pub fn basic_auth(username: &str, password: &str) -> String {
        let credentials = format!("{}:{}", username, password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    /// Create bearer token header value
    pub fn bearer_token(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Parse user:password format
    pub fn parse_user_pass(input: &str) -> Result<(String, String)> {
        match input.split_once(':') {
            Some(("", _)) => Err(ApiError::Config(
                "Invalid user:password format".to_string(),
            )),
            Some((user, pass)) => Ok((user.to_string(), pass.to_string())),
            None if input.is_empty() => Err(ApiError::Config(
                "Invalid user:password format".to_string(),
            )),
            None => Ok((input.to_string(), String::new())),
        }
    }
}
