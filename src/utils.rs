//! Utility functions and helpers

use crate::error::{ApiError, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// URL validation and route resolution utilities
pub struct UrlUtils;

impl UrlUtils {
    /// Validate and normalize URL
    pub fn validate_url(input: &str) -> Result<Url> {
        // Add http:// if no scheme is provided
        let url_str = if input.contains("://") {
            input.to_string()
        } else {
            format!("http://{}", input)
        };

        let url = Url::parse(&url_str)
            .map_err(|e| ApiError::InvalidUrl(format!("Invalid URL '{}': {}", input, e)))?;
        if url.host_str().is_none() {
            return Err(ApiError::InvalidUrl(format!("Missing host in '{}'", input)));
        }
        Ok(url)
    }

    /// Resolve a request route against an optional base URL.
    ///
    /// Absolute routes are used as-is. Relative routes are appended to the
    /// base path with exactly one `/` between them, so `http://h/api` and
    /// `teams/1` give `http://h/api/teams/1`.
    pub fn resolve_route(base: Option<&Url>, route: &str) -> Result<Url> {
        if Self::has_scheme(route) {
            return Self::validate_url(route);
        }
        let base = base.ok_or_else(|| {
            ApiError::InvalidUrl(format!("Relative route '{}' without a base URL", route))
        })?;
        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            route.trim_start_matches('/')
        );
        Url::parse(&joined)
            .map_err(|e| ApiError::InvalidUrl(format!("Invalid route '{}': {}", route, e)))
    }

    /// Whether `route` starts with `scheme://`, ignoring any `://` that only
    /// appears after the path, query or fragment begins.
    fn has_scheme(route: &str) -> bool {
        let Some(pos) = route.find("://") else {
            return false;
        };
        let scheme = &route[..pos];
        let mut chars = scheme.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    }
}

/// File system utilities
pub struct FileUtils;

impl FileUtils {
    /// Expand tilde (~) in file paths
    pub fn expand_path(path: &str) -> Result<PathBuf> {
        let rest = match path.strip_prefix('~') {
            Some(rest) => rest.trim_start_matches('/'),
            None => return Ok(PathBuf::from(path)),
        };
        match dirs::home_dir() {
            Some(home_dir) => Ok(home_dir.join(rest)),
            None => Err(ApiError::Config(
                "Cannot determine home directory".to_string(),
            )),
        }
    }

    /// Check if file exists and is readable
    pub fn check_file_readable(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ApiError::FileNotFound(format!(
                "File not found: {:?}",
                path
            )));
        }

        if !path.is_file() {
            return Err(ApiError::Config(format!("Path is not a file: {:?}", path)));
        }

        std::fs::File::open(path).map_err(|e| {
            ApiError::PermissionDenied(format!("Cannot read file {:?}: {}", path, e))
        })?;

        Ok(())
    }
}

/// String utilities
pub struct StringUtils;

impl StringUtils {
    /// Parse `key: value` header lines
    pub fn parse_header(input: &str) -> Result<(String, String)> {
        match input.split_once(':') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(ApiError::Config(format!(
                "Invalid header format: '{}'. Expected 'key: value'",
                input
            ))),
        }
    }

    /// Parse timeout values (supports suffixes like 's', 'm', 'h')
    pub fn parse_timeout(input: &str) -> Result<std::time::Duration> {
        if let Ok(seconds) = input.parse::<u64>() {
            return Ok(std::time::Duration::from_secs(seconds));
        }

        let (number_part, suffix) = if let Some(stripped) = input.strip_suffix("ms") {
            let millis: u64 = stripped.parse().map_err(|_| {
                ApiError::Config(format!("Invalid timeout number: '{}'", stripped))
            })?;
            return Ok(std::time::Duration::from_millis(millis));
        } else if let Some(stripped) = input.strip_suffix('s') {
            (stripped, 1)
        } else if let Some(stripped) = input.strip_suffix('m') {
            (stripped, 60)
        } else if let Some(stripped) = input.strip_suffix('h') {
            (stripped, 3600)
        } else {
            return Err(ApiError::Config(format!(
                "Invalid timeout format: '{}'. Use number with optional suffix (ms/s/m/h)",
                input
            )));
        };

        let number: u64 = number_part
            .parse()
            .map_err(|_| ApiError::Config(format!("Invalid timeout number: '{}'", number_part)))?;

        let seconds = number.checked_mul(suffix).ok_or_else(|| {
            ApiError::Config(format!("Timeout out of range: '{}'", input))
        })?;

        Ok(std::time::Duration::from_secs(seconds))
    }
}
