//! HTTP client over the HAL API
//!
//! Wraps reqwest with the three concerns every call shares: endpoint
//! resolution from the root document, the bearer header when a token is
//! stored, and mapping non-success responses (`{"message": ...}` bodies)
//! into the core error type.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use stockpile_core::prelude::*;

use crate::hal::HalDocument;
use crate::token::TokenStore;

/// Shared HTTP client for one API server.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    root: HalDocument,
    pub(crate) tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Connect to the API: build the HTTP client and fetch the HAL root
    /// document the endpoint URLs are resolved from.
    pub async fn connect(
        base_url: Url,
        tokens: Arc<dyn TokenStore>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(e.to_string()))?;

        let response = http
            .get(base_url.clone())
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(e.to_string()))?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        let root: HalDocument = serde_json::from_str(&body)?;

        debug!(
            links = %root.keys().collect::<Vec<_>>().join(","),
            "connected to API at {}", base_url
        );

        Ok(Self {
            http,
            base_url,
            root,
            tokens,
        })
    }

    /// Client with an empty root document, for tests that never touch the
    /// network.
    #[cfg(any(test, feature = "test-helpers"))]
    pub fn offline(base_url: Url, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            root: HalDocument::default(),
            tokens,
        }
    }

    /// Resolve an entity endpoint by its HAL link relation.
    pub fn url_for(&self, key: &str) -> Result<Url> {
        self.root.resolve(&self.base_url, key)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────
    // Typed request helpers
    // ─────────────────────────────────────────────────────────────

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.send(self.http.get(url)).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T> {
        self.send(self.http.post(url).json(body)).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T> {
        self.send(self.http.put(url).json(body)).await
    }

    /// PUT whose response body is irrelevant (or empty).
    pub(crate) async fn put_no_content<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<()> {
        let response = self
            .authorize(self.http.put(url).json(body))
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(api_error(status, &body))
        }
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.send(self.http.delete(url)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Error::http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(e.to_string()))?;

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(status, &body))
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.tokens.get() {
            Ok(Some(token)) => request.header("Authorization", format!("Bearer {}", token)),
            _ => request,
        }
    }
}

/// Append one path segment, percent-encoding as needed.
pub(crate) fn with_segment(mut url: Url, segment: &str) -> Result<Url> {
    url.path_segments_mut()
        .map_err(|_| Error::config("API URL cannot be a base"))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

/// Error payloads carry a human-readable `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a non-success response to the core error type. Auth failures get
/// their own variant so the shell can prompt for a new login.
pub(crate) fn api_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed")
            )
        });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Error::auth(message)
    } else {
        Error::api(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_uses_message_body() {
        let err = api_error(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Barcode already exists"}"#,
        );
        assert!(matches!(err, Error::Api { .. }));
        assert_eq!(err.user_message(), "Barcode already exists");
    }

    #[test]
    fn test_api_error_falls_back_to_status_text() {
        let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(err.user_message(), "500 Internal Server Error");
    }

    #[test]
    fn test_unauthorized_maps_to_auth_error() {
        let err = api_error(StatusCode::UNAUTHORIZED, r#"{"message": "Invalid token"}"#);
        assert!(err.is_auth_error());
        assert_eq!(err.user_message(), "Invalid token");

        let err = api_error(StatusCode::FORBIDDEN, "");
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_with_segment_appends() {
        let url = Url::parse("https://stockpile.example.com/api/items").unwrap();
        let url = with_segment(url, "9000001").unwrap();
        assert_eq!(
            url.as_str(),
            "https://stockpile.example.com/api/items/9000001"
        );
    }

    #[test]
    fn test_with_segment_handles_trailing_slash() {
        let url = Url::parse("https://stockpile.example.com/api/items/").unwrap();
        let url = with_segment(url, "9000001").unwrap();
        assert_eq!(
            url.as_str(),
            "https://stockpile.example.com/api/items/9000001"
        );
    }

    #[test]
    fn test_with_segment_percent_encodes() {
        let url = Url::parse("https://stockpile.example.com/api/items").unwrap();
        let url = with_segment(url, "90 01").unwrap();
        assert!(url.as_str().ends_with("/items/90%2001"));
    }
}
