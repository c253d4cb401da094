//! Where raw cookie strings come from
//!
//! The reader functions are pure; a [`CookieSource`] reads the ambient
//! cookie store once and hands the string over.

use std::path::PathBuf;

use log::debug;

use crate::error::{ApiError, Result};
use crate::utils::FileUtils;

use super::CookieJar;

/// Environment variable read by [`EnvCookies::default`]
pub const DEFAULT_COOKIE_ENV: &str = "APIQUERY_COOKIE";

pub trait CookieSource {
    /// Read the raw cookie string
    fn read(&self) -> Result<String>;

    /// Read and parse into a jar
    fn jar(&self) -> Result<CookieJar> {
        Ok(super::parse(&self.read()?))
    }
}

/// A cookie string supplied directly
#[derive(Debug, Clone)]
pub struct LiteralCookies(pub String);

impl CookieSource for LiteralCookies {
    fn read(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Cookie string held in an environment variable
#[derive(Debug, Clone)]
pub struct EnvCookies {
    var: String,
}

impl EnvCookies {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCookies {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_ENV)
    }
}

impl CookieSource for EnvCookies {
    fn read(&self) -> Result<String> {
        debug!("reading cookies from ${}", self.var);
        std::env::var(&self.var).map_err(|e| ApiError::Cookie(format!("${}: {}", self.var, e)))
    }
}

/// Cookie string stored in a file (a saved `Cookie` header value)
#[derive(Debug, Clone)]
pub struct FileCookies {
    path: PathBuf,
}

impl FileCookies {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CookieSource for FileCookies {
    fn read(&self) -> Result<String> {
        debug!("reading cookies from {:?}", self.path);
        FileUtils::check_file_readable(&self.path)?;
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(contents.trim_end_matches(['\r', '\n']).to_string())
    }
}
