//! Cookie string parsing
//!
//! Cookies arrive as the raw `name=value; name=value` string a browser
//! exposes through `document.cookie` or sends in a `Cookie` header. This
//! module parses that string into discrete pairs and looks names up
//! exactly. The older substring-search reader lives on in [`legacy`]
//! for callers that depend on its behaviour.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

pub mod legacy;
pub mod source;

pub use source::{CookieSource, EnvCookies, FileCookies, LiteralCookies};

/// A single `name=value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

/// Ordered collection of cookies parsed from a cookie string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the first cookie named exactly `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// Set a cookie, replacing the value of an existing one with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.cookies.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.value = value,
            None => self.cookies.push(Cookie { name, value }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.iter()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Render as a `Cookie` header value
    pub fn to_header(&self) -> String {
        self.cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for CookieJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header())
    }
}

impl FromStr for CookieJar {
    type Err = ApiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

/// Parse a raw cookie string.
///
/// Pairs are separated by `;` and split on their first `=`. Fragments with
/// no `=` or an empty name are skipped. When a name repeats, the first
/// occurrence wins, matching browser ordering (most specific path first).
pub fn parse(raw: &str) -> CookieJar {
    let mut jar = CookieJar::new();
    for pair in raw.split(';') {
        let Some((name, value)) = pair.trim().split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() || jar.get(name).is_some() {
            continue;
        }
        jar.cookies.push(Cookie {
            name: name.to_string(),
            value: value.trim().to_string(),
        });
    }
    jar
}

/// Look up `name` in a raw cookie string. `None` when absent.
pub fn get_cookie(raw: &str, name: &str) -> Option<String> {
    parse(raw).get(name).map(str::to_string)
}
