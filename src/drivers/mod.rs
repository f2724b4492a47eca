//! Provider 驱动抽象层 — 通过 trait 实现多厂商 TTS API 适配
//!
//! Provider driver abstraction layer. Each supported speech API has a concrete
//! [`SpeechDriver`] that knows how to build its HTTP request and how to turn its
//! response into a [`SynthesisResult`]. The set of drivers is closed: the
//! [`ProviderKind`] enum selects one through [`create_driver`].

pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::config::ProviderKind;
use crate::transport::{HttpTransport, TransportResponse};
use crate::types::{AudioFormat, SynthesisResult, VoiceDescriptor};
use crate::{Error, ErrorContext, Result};

pub use gemini::GeminiDriver;
pub use openai::OpenAiDriver;

/// Where the API key travels on the wire.
#[derive(Clone, PartialEq, Eq)]
pub enum ApiKeyPlacement {
    /// `Authorization: Bearer <key>`
    Bearer(String),
    /// `?<name>=<key>`
    Query { name: &'static str, value: String },
}

impl fmt::Debug for ApiKeyPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Self::Query { name, .. } => write!(f, "Query({}=<redacted>)", name),
        }
    }
}

/// Provider-specific HTTP request, ready for the transport.
#[derive(Debug, Clone)]
pub struct DriverRequest {
    /// Full endpoint URL, without credentials.
    pub url: String,
    pub api_key: ApiKeyPlacement,
    /// JSON request body.
    pub body: Value,
}

/// Normalized input handed to a driver after validation and defaulting.
#[derive(Debug, Clone, Copy)]
pub struct SpeechInput<'a> {
    pub text: &'a str,
    /// Requested voice id; resolved against the driver's catalog.
    pub voice: &'a str,
    pub format: AudioFormat,
    pub speed: Option<f32>,
    /// Correlation id, forwarded as `x-request-id`.
    pub request_id: Option<&'a str>,
}

impl<'a> SpeechInput<'a> {
    pub fn new(text: &'a str, voice: &'a str, format: AudioFormat) -> Self {
        Self {
            text,
            voice,
            format,
            speed: None,
            request_id: None,
        }
    }
}

/// Core trait for provider-specific TTS adaptation.
///
/// Request building and response parsing are pure so they can be tested without
/// a network; [`SpeechDriver::synthesize`] glues them to the transport and issues
/// exactly one HTTP request.
#[async_trait]
pub trait SpeechDriver: Send + Sync + fmt::Debug {
    fn provider(&self) -> ProviderKind;

    /// Static voice catalog, in display order. Never empty.
    fn voices(&self) -> &'static [VoiceDescriptor];

    fn default_voice(&self) -> Option<&'static VoiceDescriptor> {
        self.voices().first()
    }

    /// Look up a voice id in this provider's catalog.
    fn resolve_voice(&self, voice: &str) -> Result<&'static VoiceDescriptor> {
        self.voices()
            .iter()
            .find(|v| v.matches(voice))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!("Unknown voice '{}' for provider {}", voice, self.provider()),
                    ErrorContext::new()
                        .with_field_path("request.voice")
                        .with_details(format!(
                            "available: {}",
                            self.voices()
                                .iter()
                                .map(|v| v.id)
                                .collect::<Vec<_>>()
                                .join(", ")
                        ))
                        .with_source(format!("{}_driver", self.provider())),
                )
            })
    }

    /// Build the provider-specific HTTP request.
    fn build_request(&self, input: &SpeechInput<'_>) -> Result<DriverRequest>;

    /// Turn a successful (2xx) response into normalized audio.
    fn parse_response(
        &self,
        input: &SpeechInput<'_>,
        response: TransportResponse,
    ) -> Result<SynthesisResult>;

    async fn synthesize(
        &self,
        input: &SpeechInput<'_>,
        transport: &HttpTransport,
    ) -> Result<SynthesisResult> {
        let request = self.build_request(input)?;
        let response = transport
            .execute(self.provider(), &request, input.request_id)
            .await?;
        self.parse_response(input, response)
    }
}

/// Factory for the closed set of drivers.
pub fn create_driver(
    provider: ProviderKind,
    api_key: &str,
    model: &str,
    base_url: &str,
) -> Box<dyn SpeechDriver> {
    match provider {
        ProviderKind::OpenAi => Box::new(OpenAiDriver::new(api_key, model, base_url)),
        ProviderKind::Gemini => Box::new(GeminiDriver::new(api_key, model, base_url)),
    }
}
