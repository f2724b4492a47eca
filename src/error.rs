use crate::error_code::ErrorCode;
use serde::Serialize;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "request.text", "TTS_PROVIDER")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected range, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "request_validator", "gemini_driver")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Unified error type of the speech gateway.
///
/// Three families, each mapping onto one or more [`ErrorCode`]s. Every failure
/// crosses the public API as a value of this type; nothing panics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error [{code}]: {message}{}", format_context(.context))]
    Validation {
        code: ErrorCode,
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Provider error: {message}{}", format_context(.context))]
    Provider {
        message: String,
        /// HTTP status when the provider answered at all.
        status: Option<u16>,
        context: ErrorContext,
    },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

/// Wire rendering of an error: `{"error": true, "code": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: bool,
    pub code: ErrorCode,
    pub message: String,
}

impl Error {
    pub fn text_too_long(len: usize, max: usize) -> Self {
        Error::Validation {
            code: ErrorCode::TextTooLong,
            message: format!("Text is {} characters long; the maximum is {}", len, max),
            context: ErrorContext::new()
                .with_field_path("request.text")
                .with_source("request_validator"),
        }
    }

    /// Empty, absent or otherwise unusable input.
    pub fn missing_input_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            code: ErrorCode::MissingInput,
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Provider failure without an HTTP status (network error, malformed payload).
    pub fn provider_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Provider {
            message: msg.into(),
            status: None,
            context,
        }
    }

    /// Provider answered with a non-success HTTP status.
    pub fn provider_status(status: u16, msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Provider {
            message: msg.into(),
            status: Some(status),
            context,
        }
    }

    /// The discriminant callers branch on.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Validation { code, .. } => *code,
            Error::Configuration { .. } => ErrorCode::Configuration,
            Error::Provider { .. } => ErrorCode::Provider,
        }
    }

    /// Human-readable diagnostic, without the context suffix.
    pub fn message(&self) -> &str {
        match self {
            Error::Validation { message, .. }
            | Error::Configuration { message, .. }
            | Error::Provider { message, .. } => message,
        }
    }

    pub fn context(&self) -> &ErrorContext {
        match self {
            Error::Validation { context, .. }
            | Error::Configuration { context, .. }
            | Error::Provider { context, .. } => context,
        }
    }

    /// HTTP status reported by the provider, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Provider { status, .. } => *status,
            _ => None,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: true,
            code: self.code(),
            message: self.message().to_string(),
        }
    }
}
