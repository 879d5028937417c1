//! Catalog fetching for skiphire.
//!
//! Provides the HTTP client the catalog is fetched with, the catalog sources
//! (remote endpoint or local file) and the loader that runs the one-shot
//! fetch against a shared [`Session`](skiphire_core::session::Session).
//!
//! # Example
//!
//! ```rust,no_run
//! use skiphire_data::prelude::*;
//!
//! # async fn run() -> Result<(), FetchError> {
//! let client = FetchClient::new(TimeoutConfig::default())?
//!     .with_base_url(DEFAULT_BASE_URL);
//! let source = HttpCatalogSource::new(client, CatalogLocation::default());
//!
//! let session = shared_session();
//! let loader = CatalogLoader::new(source);
//! loader.load(&session).await;
//!
//! let mut session = session.lock().await;
//! println!("{} skips", session.filtered().len());
//! # Ok(())
//! # }
//! ```

mod catalog;
mod error;
mod loader;
mod response;
mod timeout;

pub use catalog::{
    encode_query_param, parse_catalog, CatalogLocation, CatalogSource, FileCatalogSource,
    HttpCatalogSource, DEFAULT_AREA, DEFAULT_BASE_URL, DEFAULT_POSTCODE,
};
pub use error::FetchError;
pub use loader::{shared_session, CatalogLoader, SharedSession};
pub use response::Response;
pub use timeout::TimeoutConfig;

use std::collections::HashMap;
use tracing::debug;

/// HTTP client for outbound catalog requests.
///
/// Wraps a [`reqwest::Client`] configured from a [`TimeoutConfig`], with an
/// optional base URL prepended to relative paths.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    timeout: TimeoutConfig,
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new(timeout: TimeoutConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .user_agent(concat!("skiphire/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            http,
            base_url: None,
            timeout,
        })
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn timeout(&self) -> TimeoutConfig {
        self.timeout
    }

    /// Resolve `url` against the base URL unless it is already absolute.
    pub fn resolve(&self, url: &str) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url.to_string(),
        }
    }

    /// Create a GET request.
    pub fn get(&self, url: impl AsRef<str>) -> ClientRequestBuilder {
        ClientRequestBuilder {
            http: self.http.clone(),
            url: self.resolve(url.as_ref()),
            headers: HashMap::new(),
        }
    }
}

/// A request builder bound to a client.
#[derive(Debug)]
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    url: String,
    headers: HashMap<String, String>,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send the request and read the whole response.
    pub async fn send(self) -> Result<Response, FetchError> {
        debug!(url = %self.url, "GET");
        let mut request = self.http.get(&self.url);
        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await?;
        Response::read(response).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        shared_session, CatalogLoader, CatalogLocation, CatalogSource, FetchClient, FetchError,
        FileCatalogSource, HttpCatalogSource, Response, SharedSession, TimeoutConfig,
        DEFAULT_BASE_URL,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_against_base_url() {
        let client = FetchClient::new(TimeoutConfig::default())
            .unwrap()
            .with_base_url("http://localhost:8080/");

        assert_eq!(client.resolve("/api/skips"), "http://localhost:8080/api/skips");
        assert_eq!(client.resolve("https://other.test/x"), "https://other.test/x");
    }

    #[test]
    fn test_no_base_url() {
        let client = FetchClient::new(TimeoutConfig::default()).unwrap();
        assert_eq!(client.base_url(), None);
        assert_eq!(client.resolve("/api/skips"), "/api/skips");
    }

    #[test]
    fn test_request_builder_headers() {
        let client = FetchClient::new(TimeoutConfig::from_millis(1000))
            .unwrap()
            .with_base_url("http://localhost");

        let request = client.get("/api/skips").header("Accept", "application/json");
        assert_eq!(request.url(), "http://localhost/api/skips");
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(client.timeout().total.as_millis(), 1000);
    }
}
