//! Inbound synthesis request.

use serde::{Deserialize, Serialize};

use super::AudioFormat;

/// Text plus synthesis options, as received from the routing layer.
///
/// Deserializes from `{"text": ..., "voice"?: ..., "format"?: ..., "speed"?: ...}`.
/// A missing `text` field deserializes as an empty string and is rejected by
/// validation, not by serde.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SynthesisRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<AudioFormat>,
    /// Playback speed multiplier. Only honored by providers that support it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn format_or_default(&self) -> AudioFormat {
        self.format.unwrap_or_default()
    }
}
