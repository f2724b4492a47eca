//! Audio formats and the normalized synthesis result.

use base64::Engine as _;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{Error, ErrorContext};

/// Supported audio output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    Pcm,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        Self::Mp3,
        Self::Opus,
        Self::Aac,
        Self::Flac,
        Self::Wav,
        Self::Pcm,
    ];

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            Self::Pcm => "audio/pcm",
        }
    }

    /// Name used in provider request bodies (`response_format`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }
}

impl FromStr for AudioFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::missing_input_with_context(
                    format!("Unsupported audio format: {}", wanted),
                    ErrorContext::new()
                        .with_field_path("request.format")
                        .with_details("expected one of mp3, opus, aac, flac, wav, pcm"),
                )
            })
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized audio returned by every provider adapter.
///
/// The buffer is owned by the caller; the gateway keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisResult {
    #[serde(serialize_with = "serialize_base64")]
    pub audio_buffer: Vec<u8>,
    pub content_type: String,
}

impl SynthesisResult {
    pub fn new(audio_buffer: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            audio_buffer,
            content_type: content_type.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.audio_buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio_buffer.is_empty()
    }
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}
