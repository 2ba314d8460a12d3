//! HTTP utilities for the backend REST API

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!("{}... [truncated, {} bytes total]", &body[..MAX_LOG_BODY_LENGTH], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for backend API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tbib/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::read_json(response).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, url: &str, body: &Value) -> Result<Value> {
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        Self::read_json(response).await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch(&self, url: &str, body: &Value) -> Result<Value> {
        tracing::debug!("PATCH {}", url);

        let response = self
            .client
            .patch(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        Self::read_json(response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str) -> Result<Value> {
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::read_json(response).await
    }

    /// Check the status and parse the response body as JSON.
    /// An empty body (e.g. 204) parses as `Value::Null`.
    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        if body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).context("Failed to parse response JSON")
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

/// Format a backend API error for display
pub fn format_api_error(error: &anyhow::Error) -> String {
    let error_str = error.to_string();

    // Clean up common error patterns with user-friendly messages
    if error_str.contains("404") {
        return "Record not found.".to_string();
    }
    if error_str.contains("400") {
        return "Invalid request. Check the submitted fields.".to_string();
    }
    if error_str.contains("409") {
        return "Conflict. A record with this id may already exist.".to_string();
    }
    if error_str.contains("500") || error_str.contains("503") {
        return "Backend temporarily unavailable. Please try again.".to_string();
    }

    if error_str.contains("API request failed") {
        return "Request failed. Check the backend and try again.".to_string();
    }
    if error_str.contains("Failed to send request") {
        return "Could not reach the backend. Is it running?".to_string();
    }

    // Truncate long error messages
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(80)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("truncated"));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_format_api_error_not_found() {
        let err = anyhow::anyhow!("API request failed: 404 Not Found");
        assert_eq!(format_api_error(&err), "Record not found.");
    }

    #[test]
    fn test_format_api_error_connection() {
        let err = anyhow::anyhow!("Failed to send request");
        assert_eq!(
            format_api_error(&err),
            "Could not reach the backend. Is it running?"
        );
    }
}
