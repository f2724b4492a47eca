use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::client::validation::validate_request;
use crate::config::ProviderConfig;
use crate::drivers::SpeechInput;
use crate::registry;
use crate::transport::HttpTransport;
use crate::types::{SynthesisRequest, SynthesisResult, VoiceDescriptor};
use crate::{Error, ErrorContext, Result};

/// Provider-agnostic speech synthesis client.
///
/// Holds one immutable [`ProviderConfig`] and a pooled HTTP transport. Calls are
/// independent: no state is written while a request is in flight, so the client
/// can be shared across tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SpeechClient {
    config: ProviderConfig,
    transport: HttpTransport,
    voices: &'static [VoiceDescriptor],
}

impl SpeechClient {
    /// Build a client for an explicit configuration.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        let voices = registry::available_voices(&config);
        Ok(Self {
            config,
            transport,
            voices,
        })
    }

    /// Build a client from `TTS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ProviderConfig::from_env()?)
    }

    pub fn builder() -> crate::client::SpeechClientBuilder {
        crate::client::SpeechClientBuilder::new()
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Voice catalog of the active provider, in display order.
    pub fn available_voices(&self) -> &'static [VoiceDescriptor] {
        self.voices
    }

    /// Synthesize speech for one request.
    ///
    /// Validation runs first and short-circuits; then the voice and format
    /// defaults are applied, the driver is resolved from configuration, and
    /// exactly one provider request is made. Errors are returned unchanged.
    pub async fn generate_speech(&self, request: &SynthesisRequest) -> Result<SynthesisResult> {
        let request_id = Uuid::new_v4().to_string();
        let provider = self.config.provider();
        let span = info_span!(
            "generate_speech",
            request_id = %request_id,
            provider = provider.id()
        );

        async {
            if let Err(e) = validate_request(request) {
                debug!(code = %e.code(), "request rejected by validation");
                return Err(e);
            }

            let voice = match request.voice.as_deref().map(str::trim) {
                Some(v) if !v.is_empty() => v,
                _ => self.default_voice()?.id,
            };
            let format = request.format_or_default();

            let driver = registry::resolve_adapter(&self.config).map_err(|e| {
                warn!(error = %e, "provider is not usable");
                e
            })?;

            let input = SpeechInput {
                text: &request.text,
                voice,
                format,
                speed: request.speed,
                request_id: Some(request_id.as_str()),
            };

            let started = Instant::now();
            let outcome = driver.synthesize(&input, &self.transport).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;
            match &outcome {
                Ok(audio) => info!(
                    bytes = audio.len(),
                    content_type = %audio.content_type,
                    elapsed_ms,
                    "speech synthesized"
                ),
                Err(e) => warn!(code = %e.code(), elapsed_ms, error = %e, "speech synthesis failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    /// Wire-level entry point for a routing layer.
    ///
    /// Accepts `{"text", "voice"?, "format"?, "speed"?}` and answers with either
    /// `{"audioBuffer", "contentType"}` or `{"error": true, "code", "message"}`.
    pub async fn handle_json(&self, payload: &Value) -> Value {
        let outcome = match serde_json::from_value::<SynthesisRequest>(payload.clone()) {
            Ok(request) => self.generate_speech(&request).await,
            Err(e) => Err(Error::missing_input_with_context(
                format!("Malformed synthesis request: {}", e),
                ErrorContext::new().with_source("json_handler"),
            )),
        };
        render_outcome(&outcome)
    }

    fn default_voice(&self) -> Result<&'static VoiceDescriptor> {
        self.voices.first().ok_or_else(|| {
            Error::configuration(format!(
                "Provider {} has an empty voice catalog",
                self.config.provider()
            ))
        })
    }
}

/// Render a synthesis outcome in the inbound wire shape.
pub fn render_outcome(outcome: &Result<SynthesisResult>) -> Value {
    let rendered = match outcome {
        Ok(result) => serde_json::to_value(result),
        Err(e) => serde_json::to_value(e.to_payload()),
    };
    rendered.unwrap_or(Value::Null)
}
