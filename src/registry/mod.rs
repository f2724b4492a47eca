//! Provider 注册表 — 按配置的 provider 标识解析驱动与静态音色目录
//!
//! Provider registry. Selection is a pure lookup over the closed
//! [`ProviderKind`] set; configuration problems are reported here, before any
//! driver touches the network. Catalogs are never merged across providers.

use url::Url;

use crate::config::ProviderKind;
use crate::config::{ProviderConfig, ENV_BASE_URL, ENV_MODEL};
use crate::drivers::{self, gemini, openai, SpeechDriver};
use crate::types::VoiceDescriptor;
use crate::{Error, ErrorContext, Result};

/// All providers compiled into this build.
pub fn supported_providers() -> &'static [ProviderKind] {
    &ProviderKind::ALL
}

/// Static voice catalog of a provider.
pub fn catalog_for(provider: ProviderKind) -> &'static [VoiceDescriptor] {
    match provider {
        ProviderKind::OpenAi => openai::VOICES,
        ProviderKind::Gemini => gemini::VOICES,
    }
}

/// Voice catalog of the configured provider. Does not require an API key.
pub fn available_voices(config: &ProviderConfig) -> &'static [VoiceDescriptor] {
    catalog_for(config.provider())
}

/// Resolve the driver for the configured provider.
///
/// Fails with `CONFIGURATION_ERROR` when the API key is missing, the model id
/// cannot be placed in a request, or the base URL is not an absolute http(s) URL.
pub fn resolve_adapter(config: &ProviderConfig) -> Result<Box<dyn SpeechDriver>> {
    let provider = config.provider();
    let context = || ErrorContext::new().with_source("provider_registry");

    let api_key = config.api_key().ok_or_else(|| {
        Error::configuration_with_context(
            format!("TTS API key is not configured for provider {}", provider),
            context().with_field_path(provider.api_key_env()),
        )
    })?;

    validate_model(config.model()).map_err(|details| {
        Error::configuration_with_context(
            format!("Malformed model identifier for {}: '{}'", provider, config.model()),
            context().with_field_path(ENV_MODEL).with_details(details),
        )
    })?;

    validate_base_url(config.base_url()).map_err(|details| {
        Error::configuration_with_context(
            format!("Invalid base URL for {}: '{}'", provider, config.base_url()),
            context().with_field_path(ENV_BASE_URL).with_details(details),
        )
    })?;

    Ok(drivers::create_driver(
        provider,
        api_key,
        config.model(),
        config.base_url(),
    ))
}

// Model ids end up in URL paths (Gemini) and request bodies (OpenAI).
fn validate_model(model: &str) -> std::result::Result<(), &'static str> {
    if model.is_empty() {
        return Err("model must not be empty");
    }
    if model
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
    {
        return Err("model must not contain whitespace, '/', '?' or '#'");
    }
    Ok(())
}

fn validate_base_url(base_url: &str) -> std::result::Result<(), String> {
    let url = Url::parse(base_url).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
