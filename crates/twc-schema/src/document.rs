//! Swagger 2 document model.
//!
//! Only the parts the compiler reads are modelled. Schemas stay as
//! [`serde_json::Value`] because they are interpreted structurally.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use twc_core::{Error, Result};

/// A Swagger 2 document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecDocument {
    /// Declared Swagger version
    #[serde(default)]
    pub swagger: Option<String>,
    /// Document metadata
    #[serde(default)]
    pub info: Option<Info>,
    /// Operations keyed by URL path
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
    /// Reusable schemas keyed by definition name
    #[serde(default)]
    pub definitions: BTreeMap<String, Value>,
}

/// Document title and version.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    /// API title
    #[serde(default)]
    pub title: Option<String>,
    /// API version
    #[serde(default)]
    pub version: Option<String>,
}

/// Operations available on one URL path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    /// `GET`
    pub get: Option<Operation>,
    /// `PUT`
    pub put: Option<Operation>,
    /// `POST`
    pub post: Option<Operation>,
    /// `DELETE`
    pub delete: Option<Operation>,
    /// `OPTIONS`
    pub options: Option<Operation>,
    /// `HEAD`
    pub head: Option<Operation>,
    /// `PATCH`
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Operations in a fixed verb order, paired with their lower-case verb.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
        ]
        .into_iter()
        .filter_map(|(verb, op)| op.as_ref().map(|op| (verb, op)))
    }
}

/// A single API operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation identifier such as `chat_postMessage`
    #[serde(default)]
    pub operation_id: Option<String>,
    /// Responses keyed by status code or `default`
    #[serde(default)]
    pub responses: BTreeMap<String, Response>,
}

/// One documented response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    /// Human readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Response body schema
    #[serde(default)]
    pub schema: Option<Value>,
}

impl SpecDocument {
    /// Parses a document from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the bytes are not a Swagger
    /// document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| Error::SerializationError {
            message: "specification is not valid JSON".to_string(),
            source: Some(e),
        })?;
        Self::from_value(value)
    }

    /// Interprets an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] if the value is not a Swagger 2
    /// document.
    pub fn from_value(value: Value) -> Result<Self> {
        if value.get("openapi").is_some() {
            return Err(Error::SerializationError {
                message: "OpenAPI 3 documents are not supported, expected Swagger 2".to_string(),
                source: None,
            });
        }
        if !value.get("paths").is_some_and(Value::is_object) {
            return Err(Error::SerializationError {
                message: "specification has no 'paths' object".to_string(),
                source: None,
            });
        }

        serde_json::from_value(value).map_err(|e| Error::SerializationError {
            message: "specification does not match the Swagger 2 layout".to_string(),
            source: Some(e),
        })
    }

    /// Total number of operations across all paths.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations().count()).sum()
    }

    /// Title and version for log messages.
    #[must_use]
    pub fn describe(&self) -> String {
        let info = self.info.as_ref();
        let title = info.and_then(|i| i.title.as_deref()).unwrap_or("untitled");
        let version = info.and_then(|i| i.version.as_deref()).unwrap_or("unversioned");
        format!("{title} ({version})")
    }
}
