//! 配置模块：进程级、不可变的 Provider 配置（provider 选择、API key、模型覆盖）。
//!
//! Provider configuration.
//!
//! A [`ProviderConfig`] is built once (explicitly, from the environment, or from an
//! injected lookup) and handed to [`crate::SpeechClient`] at construction time. It is
//! never mutated afterwards.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TTS_PROVIDER` | `openai` or `gemini` | `openai` |
//! | `<PROVIDER>_API_KEY` | API key of the selected provider | none |
//! | `TTS_MODEL` | Model override | provider default |
//! | `TTS_BASE_URL` | Endpoint base override (mock servers, gateways) | provider default |
//! | `TTS_HTTP_TIMEOUT_SECS` | Request timeout | none |
//! | `TTS_PROXY_URL` | HTTP(S) proxy | none |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use keyring::Entry;
use tracing::debug;

use crate::drivers::{gemini, openai};
use crate::{Error, ErrorContext, Result};

/// Keyring service name used for API key lookup.
pub const KEYRING_SERVICE: &str = "tts-gateway";

pub const ENV_PROVIDER: &str = "TTS_PROVIDER";
pub const ENV_MODEL: &str = "TTS_MODEL";
pub const ENV_BASE_URL: &str = "TTS_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "TTS_HTTP_TIMEOUT_SECS";
pub const ENV_PROXY_URL: &str = "TTS_PROXY_URL";

/// The closed set of supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI-style speech endpoint: raw audio body.
    OpenAi,
    /// Gemini generateContent endpoint: base64 inline audio in JSON.
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [Self::OpenAi, Self::Gemini];

    /// Identifier used in configuration (`TTS_PROVIDER`).
    pub fn id(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> String {
        format!("{}_API_KEY", self.id().to_uppercase())
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => openai::DEFAULT_MODEL,
            Self::Gemini => gemini::DEFAULT_MODEL,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => openai::DEFAULT_BASE_URL,
            Self::Gemini => gemini::DEFAULT_BASE_URL,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!("Unknown TTS provider: {}", wanted),
                    ErrorContext::new()
                        .with_field_path(ENV_PROVIDER)
                        .with_details("expected one of: openai, gemini")
                        .with_source("provider_config"),
                )
            })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Immutable configuration of the active provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    provider: ProviderKind,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    proxy_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            api_key: None,
            model: None,
            base_url: None,
            timeout: None,
            proxy_url: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Load from process environment, preferring a keyring entry for the API key.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::from_lookup(|name| std::env::var(name).ok())?;
        if let Some(key) = keyring_api_key(config.provider) {
            debug!(provider = config.provider.id(), "using API key from keyring");
            config.api_key = Some(key);
        }
        Ok(config)
    }

    /// Load from an arbitrary variable lookup. Blank values count as unset.
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use tts_gateway::config::{ProviderConfig, ProviderKind};
    ///
    /// let vars: HashMap<&str, &str> =
    ///     HashMap::from([("TTS_PROVIDER", "gemini"), ("GEMINI_API_KEY", "k")]);
    /// let config = ProviderConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
    /// assert_eq!(config.provider(), ProviderKind::Gemini);
    /// assert_eq!(config.api_key(), Some("k"));
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider = match get(ENV_PROVIDER) {
            Some(id) => id.parse::<ProviderKind>()?,
            None => ProviderKind::OpenAi,
        };

        let timeout = match get(ENV_TIMEOUT_SECS) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        let config = Self {
            provider,
            api_key: get(&provider.api_key_env()),
            model: get(ENV_MODEL),
            base_url: get(ENV_BASE_URL),
            timeout,
            proxy_url: get(ENV_PROXY_URL),
        };
        debug!(
            provider = provider.id(),
            model = config.model(),
            has_api_key = config.api_key.is_some(),
            "loaded provider configuration"
        );
        Ok(config)
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// The configured key, if it is non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Model override or the provider default.
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Base URL override or the provider default, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim_end_matches('/')
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }
}

// API keys stay out of logs and panics.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model())
            .field("base_url", &self.base_url())
            .field("timeout", &self.timeout)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::configuration_with_context(
            format!("Invalid HTTP timeout: {}", raw),
            ErrorContext::new()
                .with_field_path(ENV_TIMEOUT_SECS)
                .with_details("expected a positive number of seconds")
                .with_source("provider_config"),
        )),
    }
}

fn keyring_api_key(provider: ProviderKind) -> Option<String> {
    let entry = Entry::new(KEYRING_SERVICE, provider.id()).ok()?;
    entry
        .get_password()
        .ok()
        .filter(|key| !key.trim().is_empty())
}
