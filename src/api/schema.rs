//! Runtime response schemas
//!
//! A [`ResponseSchema<T>`] checks an arbitrary JSON value and, when it fits,
//! narrows it to `T`.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::{ApiError, Result};
use crate::utils::FileUtils;

/// Why a value was rejected by a schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The value violated one or more schema rules
    #[error("{}", .0.join("; "))]
    Violations(Vec<String>),

    /// The value passed validation but does not fit the target type
    #[error("cannot decode value: {0}")]
    Deserialize(String),

    /// The schema document itself is not a valid JSON Schema
    #[error("invalid schema document: {0}")]
    InvalidSchema(String),
}

/// Validates a response body and narrows it to `T`
pub trait ResponseSchema<T> {
    fn parse(&self, value: Value) -> std::result::Result<T, SchemaError>;
}

/// Schema backed purely by `T`'s serde implementation
pub struct Typed<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Typed<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Typed<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> ResponseSchema<T> for Typed<T> {
    fn parse(&self, value: Value) -> std::result::Result<T, SchemaError> {
        serde_json::from_value(value).map_err(|e| SchemaError::Deserialize(e.to_string()))
    }
}

/// Schema that validates against a JSON Schema document before decoding
pub struct JsonSchema<T> {
    validator: jsonschema::Validator,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonSchema<T> {
    /// Compile a JSON Schema document
    pub fn new(schema: &Value) -> std::result::Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::InvalidSchema(e.to_string()))?;
        Ok(Self {
            validator,
            _marker: PhantomData,
        })
    }

    /// Load and compile a JSON Schema document from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        FileUtils::check_file_readable(path)?;
        let contents = std::fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&contents)?;
        Self::new(&document).map_err(ApiError::Schema)
    }

    /// Every rule `value` breaks, in validator order
    pub fn violations(&self, value: &Value) -> Vec<String> {
        self.validator
            .iter_errors(value)
            .map(|e| e.to_string())
            .collect()
    }
}

impl<T> fmt::Debug for JsonSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonSchema<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> ResponseSchema<T> for JsonSchema<T> {
    fn parse(&self, value: Value) -> std::result::Result<T, SchemaError> {
        let violations = self.violations(&value);
        if !violations.is_empty() {
            return Err(SchemaError::Violations(violations));
        }
        serde_json::from_value(value).map_err(|e| SchemaError::Deserialize(e.to_string()))
    }
}

/// Schema built from a plain function
pub struct FnSchema<F> {
    f: F,
}

/// Wrap a closure as a [`ResponseSchema`]
pub fn from_fn<T, F>(f: F) -> FnSchema<F>
where
    F: Fn(Value) -> std::result::Result<T, SchemaError>,
{
    FnSchema { f }
}

impl<T, F> ResponseSchema<T> for FnSchema<F>
where
    F: Fn(Value) -> std::result::Result<T, SchemaError>,
{
    fn parse(&self, value: Value) -> std::result::Result<T, SchemaError> {
        (self.f)(value)
    }
}
