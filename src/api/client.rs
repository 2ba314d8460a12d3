//! API Client
//!
//! Main client for the library REST backend, combining the base URL with
//! HTTP functionality.

use super::http::HttpClient;
use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

/// Main backend API client
#[derive(Clone)]
pub struct ApiClient {
    pub http: HttpClient,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given base URL
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;
        anyhow::ensure!(
            matches!(parsed.scheme(), "http" | "https"),
            "API base URL must be http or https: {}",
            base_url
        );

        let http = HttpClient::new()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured base URL (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the URL addressing a whole collection
    pub fn collection_url(&self, collection_path: &str) -> String {
        format!("{}/{}", self.base_url, collection_path)
    }

    /// Build the URL addressing one record by id
    pub fn record_url(&self, collection_path: &str, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            collection_path,
            urlencoding::encode(id)
        )
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Value> {
        self.http.get(url).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        self.http.post(url, body).await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch(&self, url: &str, body: &Value) -> Result<Value> {
        self.http.patch(url, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str) -> Result<Value> {
        self.http.delete(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(
            client.collection_url("categorias"),
            "http://localhost:3000/categorias"
        );
    }

    #[test]
    fn test_record_url_encodes_id() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(
            client.record_url("livros", "a b/c"),
            "http://localhost:3000/livros/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(ApiClient::new("ftp://localhost:3000").is_err());
        assert!(ApiClient::new("not a url").is_err());
    }
}
