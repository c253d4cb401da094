//! Typed request/response contract
//!
//! An [`ApiQueryRequest`] describes one outbound call: where it goes, which
//! method it uses, an optional JSON body and the schema its successful
//! response must satisfy. The schema is typed by the same `T` as the
//! [`ApiQueryResponse`] the transport produces, so a validated body can only
//! ever narrow to the type the caller asked for.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

pub mod response;
pub mod schema;

pub use response::ApiQueryResponse;
pub use schema::{JsonSchema, ResponseSchema, SchemaError, Typed};

/// HTTP methods a request descriptor may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Whether requests with this method may carry a body
    pub fn accepts_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ApiError::Config(format!("Unknown HTTP method: {}", s))),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Descriptor for a single typed API call
pub struct ApiQueryRequest<T> {
    route: String,
    method: HttpMethod,
    body: Option<Value>,
    headers: Vec<(String, String)>,
    response_schema: Box<dyn ResponseSchema<T> + Send + Sync>,
}

impl<T> ApiQueryRequest<T> {
    /// Create a body-less request validated by `response_schema`
    pub fn new<S>(route: impl Into<String>, method: HttpMethod, response_schema: S) -> Self
    where
        S: ResponseSchema<T> + Send + Sync + 'static,
    {
        Self {
            route: route.into(),
            method,
            body: None,
            headers: Vec::new(),
            response_schema: Box::new(response_schema),
        }
    }

    /// Shorthand for a GET request
    pub fn get<S>(route: impl Into<String>, response_schema: S) -> Self
    where
        S: ResponseSchema<T> + Send + Sync + 'static,
    {
        Self::new(route, HttpMethod::Get, response_schema)
    }

    /// Attach a JSON body. Fails for methods that do not accept one.
    pub fn with_body<B: Serialize>(self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body)?;
        self.with_json_body(value)
    }

    /// Attach an already-encoded JSON body.
    pub fn with_json_body(mut self, body: Value) -> Result<Self> {
        if !self.method.accepts_body() {
            return Err(ApiError::Config(format!(
                "{} requests cannot carry a body",
                self.method
            )));
        }
        self.body = Some(body);
        Ok(self)
    }

    /// Add a header sent with this request only
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn response_schema(&self) -> &(dyn ResponseSchema<T> + Send + Sync) {
        self.response_schema.as_ref()
    }
}

impl<T> fmt::Debug for ApiQueryRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiQueryRequest")
            .field("route", &self.route)
            .field("method", &self.method)
            .field("body", &self.body)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
