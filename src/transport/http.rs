use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Proxy;
use tracing::{debug, warn};

use crate::config::{ProviderConfig, ProviderKind, ENV_PROXY_URL};
use crate::drivers::{ApiKeyPlacement, DriverRequest};
use crate::{Error, ErrorContext, Result};

/// Longest provider error text carried into an error message.
const MAX_DIAGNOSTIC_CHARS: usize = 512;

/// Raw 2xx response handed back to a driver for parsing.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Thin wrapper over a pooled `reqwest::Client`. Cheap to share; holds no per-call state.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = config.proxy_url() {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new()
                        .with_field_path(ENV_PROXY_URL)
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            Error::configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client })
    }

    /// Issue exactly one POST. Network failures and non-2xx statuses become
    /// `PROVIDER_ERROR`s carrying the provider's diagnostic text.
    pub async fn execute(
        &self,
        provider: ProviderKind,
        request: &DriverRequest,
        request_id: Option<&str>,
    ) -> Result<TransportResponse> {
        let context = || ErrorContext::new().with_source(format!("{}_transport", provider));

        let mut req = self.client.post(&request.url).json(&request.body);
        req = match &request.api_key {
            ApiKeyPlacement::Bearer(key) => req.bearer_auth(key),
            ApiKeyPlacement::Query { name, value } => req.query(&[(*name, value.as_str())]),
        };
        if let Some(id) = request_id {
            req = req.header("x-request-id", id);
        }

        debug!(provider = provider.id(), url = %request.url, "sending synthesis request");

        // `without_url` keeps query-string API keys out of the message.
        let response = req.send().await.map_err(|e| {
            let e = e.without_url();
            warn!(provider = provider.id(), error = %e, "synthesis request failed");
            Error::provider_with_context(format!("{} request failed: {}", provider, e), context())
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.bytes().await.map_err(|e| {
            Error::provider_status(
                status.as_u16(),
                format!("Failed to read {} response: {}", provider, e.without_url()),
                context(),
            )
        })?;

        if !status.is_success() {
            let diagnostic = provider_diagnostic(&body);
            warn!(
                provider = provider.id(),
                status = status.as_u16(),
                diagnostic = %diagnostic,
                "provider returned an error status"
            );
            return Err(Error::provider_status(
                status.as_u16(),
                format!("{} API error ({}): {}", provider, status, diagnostic),
                context(),
            ));
        }

        debug!(
            provider = provider.id(),
            status = status.as_u16(),
            bytes = body.len(),
            "received synthesis response"
        );
        Ok(TransportResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

/// Best human-readable text from a provider error body.
///
/// Both supported providers wrap errors as `{"error": {"message": ...}}`; anything
/// else falls back to the (truncated) body text.
pub fn provider_diagnostic(body: &[u8]) -> String {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        let message = json
            .pointer("/error/message")
            .or_else(|| json.get("error").filter(|e| e.is_string()))
            .or_else(|| json.get("message"))
            .and_then(|m| m.as_str());
        if let Some(message) = message {
            return truncate(message.trim());
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        "<empty body>".to_string()
    } else {
        truncate(text)
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_DIAGNOSTIC_CHARS {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(MAX_DIAGNOSTIC_CHARS).collect();
        cut.push_str("...");
        cut
    }
}
