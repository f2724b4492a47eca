use std::time::Duration;

use crate::client::core::SpeechClient;
use crate::config::{ProviderConfig, ProviderKind};
use crate::Result;

/// Builder for creating speech clients with custom configuration.
///
/// Without an explicit provider, the configuration is loaded from the
/// environment (see [`ProviderConfig::from_env`]); explicit settings override it.
#[derive(Debug, Default)]
pub struct SpeechClientBuilder {
    config: Option<ProviderConfig>,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
}

impl SpeechClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete configuration instead of the environment.
    pub fn config(mut self, config: ProviderConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Apply a per-request timeout. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the provider's base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn build(self) -> Result<SpeechClient> {
        let mut config = match (self.config, self.provider) {
            (Some(config), _) => config,
            (None, Some(provider)) => ProviderConfig::new(provider),
            (None, None) => ProviderConfig::from_env()?,
        };
        if let Some(api_key) = self.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(model) = self.model {
            config = config.with_model(model);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(base_url) = self.base_url_override {
            config = config.with_base_url(base_url);
        }
        SpeechClient::new(config)
    }
}
