//! HTTP client module
//!
//! [`ApiClient`] is the transport behind [`ApiQueryRequest`]: it performs one
//! network call per request and turns every failure (network, status,
//! decoding, schema) into the error variant of [`ApiQueryResponse`].

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, COOKIE};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde_json::Value;
use url::Url;

use crate::api::{ApiQueryRequest, ApiQueryResponse};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::utils::UrlUtils;

pub mod auth;

use auth::Auth;

/// Typed HTTP client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<Url>,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        if !config.verify_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(ApiError::Http)?;
        let base_url = config
            .base_url
            .as_deref()
            .map(UrlUtils::validate_url)
            .transpose()?;

        Ok(Self {
            client,
            base_url,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `request`, folding any failure into [`ApiQueryResponse::Error`]
    pub async fn send<T>(&self, request: &ApiQueryRequest<T>) -> ApiQueryResponse<T> {
        match self.try_send(request).await {
            Ok(data) => ApiQueryResponse::Success { data },
            Err(err) => {
                warn!("{} {} failed: {}", request.method(), request.route(), err);
                ApiQueryResponse::Error {
                    error: err.to_string(),
                }
            }
        }
    }

    /// Send `request` and keep the structured error
    pub async fn try_send<T>(&self, request: &ApiQueryRequest<T>) -> Result<T> {
        let url = UrlUtils::resolve_route(self.base_url.as_ref(), request.route())?;
        debug!("> {} {}", request.method(), url);

        let mut builder = self.client.request(request.method().into(), url);

        for (key, value) in self.config.headers.iter().chain(request.headers()) {
            builder = builder.header(key, value);
        }

        if let Some(jar) = self.config.cookies.as_ref().filter(|jar| !jar.is_empty()) {
            builder = builder.header(COOKIE, jar.to_header());
        }

        if let Some(token) = &self.config.bearer_token {
            builder = builder.header(AUTHORIZATION, Auth::bearer_token(token));
        } else if let Some(username) = &self.config.auth_username {
            let password = self.config.auth_password.as_deref().unwrap_or_default();
            builder = builder.header(AUTHORIZATION, Auth::basic_auth(username, password));
        }

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("< {} ({} bytes)", status, text.len());

        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                message: error_message(status, &text),
            });
        }

        let value = decode_body(&text)?;
        Ok(request.response_schema().parse(value)?)
    }
}

/// Parse a successful body as JSON. An empty body decodes to `null`.
fn decode_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Best human-readable message for a failed response.
///
/// Prefers the `message` field of a JSON error body, then the raw body, then
/// the status reason phrase.
fn error_message(status: StatusCode, text: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(text) {
        if let Some(Value::String(message)) = fields.get("message") {
            return message.clone();
        }
    }
    match text.trim() {
        "" => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        body => body.to_string(),
    }
}
