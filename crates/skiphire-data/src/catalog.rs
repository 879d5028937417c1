//! Where the catalog comes from.

use crate::{FetchClient, FetchError};
use async_trait::async_trait;
use skiphire_core::catalog::{offerings_from_json, Offering};
use std::path::PathBuf;
use tracing::{debug, info};

/// Production catalog host.
pub const DEFAULT_BASE_URL: &str = "https://app.wewantwaste.co.uk";
/// Postcode the catalog is requested for.
pub const DEFAULT_POSTCODE: &str = "NR32";
/// Area the catalog is requested for.
pub const DEFAULT_AREA: &str = "Lowestoft";

const BY_LOCATION_PATH: &str = "/api/skips/by-location";

/// The location the catalog is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLocation {
    pub postcode: String,
    pub area: String,
}

impl CatalogLocation {
    pub fn new(postcode: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            postcode: postcode.into(),
            area: area.into(),
        }
    }

    /// Request path with the encoded query string.
    pub fn path(&self) -> String {
        format!(
            "{}?postcode={}&area={}",
            BY_LOCATION_PATH,
            encode_query_param(&self.postcode),
            encode_query_param(&self.area)
        )
    }
}

impl Default for CatalogLocation {
    fn default() -> Self {
        Self::new(DEFAULT_POSTCODE, DEFAULT_AREA)
    }
}

/// Percent-encode one query parameter value.
pub fn encode_query_param(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Parse a catalog body.
///
/// Invalid JSON is an error; valid JSON that is not an array is an empty
/// catalog.
pub fn parse_catalog(body: &[u8]) -> Result<Vec<Offering>, FetchError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    Ok(offerings_from_json(value))
}

/// Something that can produce the raw catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every offering once.
    async fn fetch_catalog(&self) -> Result<Vec<Offering>, FetchError>;

    /// Human-readable origin, for logs and the CLI.
    fn describe(&self) -> String;
}

/// Catalog fetched from the remote endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: FetchClient,
    location: CatalogLocation,
}

impl HttpCatalogSource {
    pub fn new(client: FetchClient, location: CatalogLocation) -> Self {
        Self { client, location }
    }

    pub fn location(&self) -> &CatalogLocation {
        &self.location
    }

    /// Full request URL.
    pub fn url(&self) -> String {
        self.client.resolve(&self.location.path())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<Vec<Offering>, FetchError> {
        let response = self
            .client
            .get(self.location.path())
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        debug!(
            status = response.status,
            content_type = response.content_type().unwrap_or("-"),
            bytes = response.bytes().len(),
            "catalog response"
        );
        let offerings = parse_catalog(response.bytes())?;
        info!(
            postcode = %self.location.postcode,
            area = %self.location.area,
            count = offerings.len(),
            "fetched catalog"
        );
        Ok(offerings)
    }

    fn describe(&self) -> String {
        self.url()
    }
}

/// Catalog read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_catalog(&self) -> Result<Vec<Offering>, FetchError> {
        debug!(path = %self.path.display(), "reading catalog file");
        let body = tokio::fs::read(&self.path).await.map_err(|e| FetchError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        parse_catalog(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
