//! apiquery - typed request/response contract for JSON backends
//!
//! This crate describes API calls as typed values ([`api::ApiQueryRequest`]),
//! sends them over HTTP ([`http::ApiClient`]) and hands back a two-variant
//! outcome ([`api::ApiQueryResponse`]) that callers match on instead of
//! handling errors through control flow. It also carries a small cookie
//! reader for pulling named values out of raw `Cookie` strings.

pub mod api;
pub mod cli;
pub mod config;
pub mod cookies;
pub mod error;
pub mod exit_code;
pub mod http;
pub mod logging;
pub mod output;
pub mod utils;

pub use api::{ApiQueryRequest, ApiQueryResponse, HttpMethod};
pub use error::{ApiError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
