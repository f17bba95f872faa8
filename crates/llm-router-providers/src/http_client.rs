//! Generic JSON-over-HTTP vendor client.
//!
//! Each adapter builds one [`HttpVendorClient`] pointed at its vendor's
//! endpoint with its vendor's auth headers. The client knows nothing about
//! request or response shapes: it POSTs the serialized native request and
//! hands back the response body as raw JSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tracing::{debug, error, warn};

use llm_router_core::config::ProviderSettings;
use llm_router_core::utils::truncate_string;

use crate::traits::{VendorClient, VendorError};

/// Transport timeout when the settings don't specify one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// A vendor client that POSTs JSON to a fixed URL.
pub struct HttpVendorClient {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// Full endpoint URL (e.g. `"https://api.openai.com/v1/chat/completions"`).
    url: String,
    /// Auth plus any extra headers, sent with every request.
    headers: HeaderMap,
}

impl std::fmt::Debug for HttpVendorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpVendorClient")
            .field("url", &self.url)
            .field("headers", &self.headers.len())
            .finish()
    }
}

impl HttpVendorClient {
    /// Create a client for `url`.
    ///
    /// # Arguments
    /// * `url`      — Full endpoint URL
    /// * `headers`  — Vendor headers (auth, versioning); sensitive values are
    ///   marked so they never show up in debug output
    /// * `settings` — Extra headers and timeout from the caller's config
    pub fn new(
        url: impl Into<String>,
        headers: &[(&str, &str)],
        settings: &ProviderSettings,
    ) -> Result<Self, VendorError> {
        let mut map = HeaderMap::new();
        for (key, value) in headers {
            insert_header(&mut map, key, value);
        }
        if let Some(ref extra) = settings.extra_headers {
            for (key, value) in extra {
                insert_header(&mut map, key, value);
            }
        }

        let timeout = settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(HttpVendorClient {
            client,
            url: url.into(),
            headers: map,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

#[async_trait]
impl<Req> VendorClient<Req> for HttpVendorClient
where
    Req: Serialize + Sync,
{
    async fn send(&self, request: &Req) -> Result<serde_json::Value, VendorError> {
        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.url, error = %e, "HTTP request failed");
                VendorError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(
                url = %self.url,
                status = %status,
                body = %truncate_string(&error_text, 500),
                "API error"
            );
            return Err(VendorError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.json::<serde_json::Value>().await?;
        debug!(url = %self.url, status = %status, "vendor response received");
        Ok(body)
    }
}

/// Join an API base and a path, tolerating a trailing slash on the base.
pub fn endpoint(api_base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        api_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn insert_header(map: &mut HeaderMap, key: &str, value: &str) {
    match (
        HeaderName::from_bytes(key.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(mut val)) => {
            if is_sensitive(&name) {
                val.set_sensitive(true);
            }
            map.insert(name, val);
        }
        _ => warn!("Invalid header: {}", key),
    }
}

fn is_sensitive(name: &HeaderName) -> bool {
    name == reqwest::header::AUTHORIZATION || name.as_str() == "x-api-key"
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
