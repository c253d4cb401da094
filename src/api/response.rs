//! Typed response result

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Outcome of a typed API call.
///
/// Serialized with an internal `status` tag:
/// `{"status":"success","data":...}` or `{"status":"error","error":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiQueryResponse<T> {
    Success { data: T },
    Error { error: String },
}

impl<T> ApiQueryResponse<T> {
    pub fn success(data: T) -> Self {
        ApiQueryResponse::Success { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiQueryResponse::Error {
            error: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiQueryResponse::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Status tag as it appears on the wire
    pub fn status(&self) -> &'static str {
        match self {
            ApiQueryResponse::Success { .. } => "success",
            ApiQueryResponse::Error { .. } => "error",
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ApiQueryResponse::Success { data } => Some(data),
            ApiQueryResponse::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ApiQueryResponse::Success { .. } => None,
            ApiQueryResponse::Error { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            ApiQueryResponse::Success { data } => Ok(data),
            ApiQueryResponse::Error { error } => Err(error),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiQueryResponse<U> {
        match self {
            ApiQueryResponse::Success { data } => ApiQueryResponse::Success { data: f(data) },
            ApiQueryResponse::Error { error } => ApiQueryResponse::Error { error },
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for ApiQueryResponse<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => ApiQueryResponse::Success { data },
            Err(err) => ApiQueryResponse::Error {
                error: err.to_string(),
            },
        }
    }
}
