//! Specification document sources.
//!
//! The generator only needs "the document, parsed". Where it comes from is a
//! collaborator: the default binary downloads it over HTTP, `--spec-file`
//! reads a local copy, and tests use an in-memory value.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use twc_schema::{SpecSource, StaticSpecSource};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = StaticSpecSource::new(json!({ "swagger": "2.0", "paths": {} }));
//! let document = source.fetch().await.unwrap();
//! assert_eq!(document.operation_count(), 0);
//! # }
//! ```

use crate::document::SpecDocument;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use twc_core::{Error, Result};

/// Provides the specification document.
///
/// Implementations must be `Send + Sync` so the source can be held across the
/// await point in the binary's async main.
#[async_trait]
pub trait SpecSource: Send + Sync {
    /// Human readable location used in logs and errors.
    fn location(&self) -> String;

    /// Retrieves and parses the document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] if the document cannot be retrieved or
    /// is not a valid Swagger 2 document.
    async fn fetch(&self) -> Result<SpecDocument>;
}

/// Downloads the document over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSpecSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSpecSource {
    /// Creates a source for `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SpecSource for HttpSpecSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<SpecDocument> {
        tracing::info!("Downloading API specification from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| fetch_failed(&self.url, e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(fetch_failed(
                &self.url,
                format!("server responded with {status}"),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_failed(&self.url, e))?;
        tracing::debug!("Downloaded {} bytes", bytes.len());

        parse(&self.url, &bytes)
    }
}

/// Reads the document from a local file.
#[derive(Debug, Clone)]
pub struct FileSpecSource {
    path: PathBuf,
}

impl FileSpecSource {
    /// Creates a source for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SpecSource for FileSpecSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<SpecDocument> {
        let location = self.location();
        tracing::info!("Reading API specification from {}", location);
        let bytes = std::fs::read(&self.path).map_err(|e| fetch_failed(&location, e))?;
        parse(&location, &bytes)
    }
}

/// Serves an in-memory document.
#[derive(Debug, Clone)]
pub struct StaticSpecSource {
    document: Value,
}

impl StaticSpecSource {
    /// Creates a source serving `document`.
    #[must_use]
    pub const fn new(document: Value) -> Self {
        Self { document }
    }
}

#[async_trait]
impl SpecSource for StaticSpecSource {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    async fn fetch(&self) -> Result<SpecDocument> {
        SpecDocument::from_value(self.document.clone())
            .map_err(|e| fetch_failed(&self.location(), e))
    }
}

fn parse(location: &str, bytes: &[u8]) -> Result<SpecDocument> {
    let document = SpecDocument::from_slice(bytes).map_err(|e| fetch_failed(location, e))?;
    tracing::info!(
        "Loaded specification {} with {} operations",
        document.describe(),
        document.operation_count()
    );
    Ok(document)
}

fn fetch_failed(
    location: &str,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> Error {
    Error::FetchFailed {
        location: location.to_string(),
        source: source.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSpecSource::new(json!({ "swagger": "2.0", "paths": {} }));
        assert_eq!(source.location(), "<memory>");
        assert!(source.fetch().await.is_ok());
    }

    #[tokio::test]
    async fn test_static_source_invalid_document() {
        let source = StaticSpecSource::new(json!({ "swagger": "2.0" }));
        let err = source.fetch().await.unwrap_err();
        assert!(err.is_fetch_error());
    }

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "swagger": "2.0", "paths": {{ "/api.test": {{ "get": {{ "operationId": "api_test", "responses": {{}} }} }} }} }}"#
        )
        .unwrap();

        let document = FileSpecSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(document.operation_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let source = FileSpecSource::new("/no/such/spec.json");
        let err = source.fetch().await.unwrap_err();
        assert!(err.is_fetch_error());
        assert!(err.to_string().contains("/no/such/spec.json"));
    }

    #[tokio::test]
    async fn test_unparsable_file_is_fetch_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html>rate limited</html>").unwrap();
        let err = FileSpecSource::new(file.path()).fetch().await.unwrap_err();
        assert!(err.is_fetch_error());
    }
}
