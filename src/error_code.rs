//! 错误码：语音合成网关对外暴露的固定错误码集合。
//!
//! Canonical error codes of the speech gateway.
//!
//! Every failure returned by [`crate::SpeechClient`] carries exactly one of these
//! codes. Callers branch on the code, never on the message text.
//!
//! | Code                  | Category      | Raised by                          |
//! |-----------------------|---------------|------------------------------------|
//! | `TEXT_TOO_LONG`       | validation    | request validator                  |
//! | `MISSING_INPUT`       | validation    | request validator, wire decoding   |
//! | `CONFIGURATION_ERROR` | configuration | config loading, adapter resolution |
//! | `PROVIDER_ERROR`      | provider      | adapters and the HTTP transport    |
//!
//! ## Example
//!
//! ```rust
//! use tts_gateway::error_code::ErrorCode;
//!
//! let code = ErrorCode::from_code("TEXT_TOO_LONG").unwrap();
//! assert_eq!(code.category(), "validation");
//! assert!(code.is_validation());
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

/// Discriminant of a gateway error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Input text exceeds the maximum length.
    TextTooLong,
    /// Input text is empty or absent, or another request field is unusable.
    MissingInput,
    /// Unknown provider, missing API key, malformed model or voice identifier.
    Configuration,
    /// Non-success HTTP status, network failure, or a response without audio.
    Provider,
}

impl ErrorCode {
    /// Returns the wire code string (e.g., `"PROVIDER_ERROR"`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::TextTooLong => "TEXT_TOO_LONG",
            Self::MissingInput => "MISSING_INPUT",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::Provider => "PROVIDER_ERROR",
        }
    }

    /// Returns the category: `"validation"`, `"configuration"` or `"provider"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::TextTooLong | Self::MissingInput => "validation",
            Self::Configuration => "configuration",
            Self::Provider => "provider",
        }
    }

    /// Validation errors are detected before any network attempt.
    #[inline]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::TextTooLong | Self::MissingInput)
    }

    /// Parses a wire code string back into an `ErrorCode`.
    pub fn from_code(code: &str) -> Option<Self> {
        let parsed = match code {
            "TEXT_TOO_LONG" => Self::TextTooLong,
            "MISSING_INPUT" => Self::MissingInput,
            "CONFIGURATION_ERROR" => Self::Configuration,
            "PROVIDER_ERROR" => Self::Provider,
            _ => return None,
        };
        Some(parsed)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}
