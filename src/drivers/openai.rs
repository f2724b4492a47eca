//! OpenAI 语音接口驱动 — 响应体即为原始音频字节
//!
//! OpenAI `/v1/audio/speech` driver. Key points:
//! - Bearer auth header, JSON body `{model, voice, input, response_format, speed?}`.
//! - The success body is the audio itself; its MIME type follows the requested format.

use async_trait::async_trait;
use serde_json::json;

use crate::config::ProviderKind;
use crate::transport::TransportResponse;
use crate::types::{SynthesisResult, VoiceDescriptor};
use crate::{Error, ErrorContext, Result};

use super::{ApiKeyPlacement, DriverRequest, SpeechDriver, SpeechInput};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "tts-1";
pub const SPEECH_PATH: &str = "/v1/audio/speech";

pub const VOICES: &[VoiceDescriptor] = &[
    VoiceDescriptor::new("alloy", "Alloy"),
    VoiceDescriptor::new("ash", "Ash"),
    VoiceDescriptor::new("ballad", "Ballad"),
    VoiceDescriptor::new("coral", "Coral"),
    VoiceDescriptor::new("echo", "Echo"),
    VoiceDescriptor::new("fable", "Fable"),
    VoiceDescriptor::new("nova", "Nova"),
    VoiceDescriptor::new("onyx", "Onyx"),
    VoiceDescriptor::new("sage", "Sage"),
    VoiceDescriptor::new("shimmer", "Shimmer"),
];

/// OpenAI-style speech driver.
#[derive(Debug)]
pub struct OpenAiDriver {
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiDriver {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: &str) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SpeechDriver for OpenAiDriver {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn voices(&self) -> &'static [VoiceDescriptor] {
        VOICES
    }

    fn build_request(&self, input: &SpeechInput<'_>) -> Result<DriverRequest> {
        let voice = self.resolve_voice(input.voice)?;
        let mut body = json!({
            "model": self.model,
            "voice": voice.id,
            "input": input.text,
            "response_format": input.format.as_str(),
        });
        if let Some(speed) = input.speed {
            body["speed"] = json!(speed);
        }
        Ok(DriverRequest {
            url: format!("{}{}", self.base_url, SPEECH_PATH),
            api_key: ApiKeyPlacement::Bearer(self.api_key.clone()),
            body,
        })
    }

    fn parse_response(
        &self,
        input: &SpeechInput<'_>,
        response: TransportResponse,
    ) -> Result<SynthesisResult> {
        if response.body.is_empty() {
            return Err(Error::provider_status(
                response.status,
                "OpenAI returned an empty audio body",
                ErrorContext::new().with_source("openai_driver"),
            ));
        }
        Ok(SynthesisResult::new(
            response.body.to_vec(),
            input.format.mime_type(),
        ))
    }
}
