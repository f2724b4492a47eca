//! Gemini generateContent 语音驱动 — 从 JSON 响应中提取 base64 内联音频
//!
//! Google Gemini `generateContent` TTS driver. Key differences from OpenAI:
//! - API key is passed as `?key=` query parameter, not in headers.
//! - The voice goes into `generationConfig.speechConfig.voiceConfig.prebuiltVoiceConfig`.
//! - Response: `candidates[].content.parts[].inlineData { mimeType, data }` where
//!   `data` is base64. The declared `mimeType` wins over the requested format.
//! - A 200 response without any inline audio part is still a failure.

use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;

use crate::config::ProviderKind;
use crate::transport::TransportResponse;
use crate::types::{SynthesisResult, VoiceDescriptor};
use crate::{Error, ErrorContext, Result};

use super::{ApiKeyPlacement, DriverRequest, SpeechDriver, SpeechInput};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";

pub const VOICES: &[VoiceDescriptor] = &[
    VoiceDescriptor::new("Kore", "Kore (Firm)"),
    VoiceDescriptor::new("Puck", "Puck (Upbeat)"),
    VoiceDescriptor::new("Charon", "Charon (Informative)"),
    VoiceDescriptor::new("Fenrir", "Fenrir (Excitable)"),
    VoiceDescriptor::new("Aoede", "Aoede (Breezy)"),
    VoiceDescriptor::new("Leda", "Leda (Youthful)"),
    VoiceDescriptor::new("Orus", "Orus (Firm)"),
    VoiceDescriptor::new("Zephyr", "Zephyr (Bright)"),
];

// Wire shapes. Gemini answers in camelCase; snake_case aliases cover the
// REST transcoding variant.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, alias = "prompt_feedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default, alias = "finish_reason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, alias = "inline_data")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default, alias = "mime_type")]
    mime_type: Option<String>,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default, alias = "block_reason")]
    block_reason: Option<String>,
}

impl InlineData {
    /// `(mime, base64)` when this part carries audio.
    fn audio(&self) -> Option<(&str, &str)> {
        let mime = self.mime_type.as_deref()?.trim();
        let data = self.data.as_deref()?.trim();
        let is_audio = mime
            .get(..6)
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case("audio/"));
        (is_audio && !data.is_empty()).then_some((mime, data))
    }
}

impl GenerateContentResponse {
    /// First audio part, scanning candidates in order.
    fn first_audio(&self) -> Option<(&str, &str)> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.inline_data.as_ref())
            .find_map(InlineData::audio)
    }

    fn missing_audio_reason(&self) -> String {
        if self.candidates.is_empty() {
            match self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
            {
                Some(reason) => format!("Gemini returned no candidates (blocked: {})", reason),
                None => "Gemini returned no candidates".to_string(),
            }
        } else {
            match self.candidates[0].finish_reason.as_deref() {
                Some(reason) => format!(
                    "Gemini response contained no inline audio data (finish reason: {})",
                    reason
                ),
                None => "Gemini response contained no inline audio data".to_string(),
            }
        }
    }
}

/// Google Gemini generateContent TTS driver.
#[derive(Debug)]
pub struct GeminiDriver {
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiDriver {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: &str) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn context() -> ErrorContext {
        ErrorContext::new().with_source("gemini_driver")
    }
}

#[async_trait]
impl SpeechDriver for GeminiDriver {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn voices(&self) -> &'static [VoiceDescriptor] {
        VOICES
    }

    fn build_request(&self, input: &SpeechInput<'_>) -> Result<DriverRequest> {
        let voice = self.resolve_voice(input.voice)?;
        let body = json!({
            "contents": [{
                "parts": [{ "text": input.text }]
            }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {
                        "prebuiltVoiceConfig": { "voiceName": voice.id }
                    }
                }
            }
        });
        Ok(DriverRequest {
            url: format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ),
            api_key: ApiKeyPlacement::Query {
                name: "key",
                value: self.api_key.clone(),
            },
            body,
        })
    }

    fn parse_response(
        &self,
        _input: &SpeechInput<'_>,
        response: TransportResponse,
    ) -> Result<SynthesisResult> {
        let parsed: GenerateContentResponse =
            serde_json::from_slice(&response.body).map_err(|e| {
                Error::provider_status(
                    response.status,
                    format!("Gemini returned malformed JSON: {}", e),
                    Self::context(),
                )
            })?;

        let (mime_type, encoded) = parsed.first_audio().ok_or_else(|| {
            Error::provider_status(response.status, parsed.missing_audio_reason(), Self::context())
        })?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| {
                Error::provider_status(
                    response.status,
                    format!("Failed to decode Gemini inline audio: {}", e),
                    Self::context().with_field_path("candidates[].content.parts[].inlineData.data"),
                )
            })?;
        if audio.is_empty() {
            return Err(Error::provider_status(
                response.status,
                "Gemini inline audio decoded to zero bytes",
                Self::context(),
            ));
        }

        Ok(SynthesisResult::new(audio, mime_type))
    }
}
