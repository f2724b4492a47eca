//! 请求校验：在任何网络调用之前检查文本长度与参数范围。
//!
//! Request validation. Pure: no I/O and no provider-specific checks; voice
//! validity belongs to the drivers because each provider has its own catalog.

use std::ops::RangeInclusive;

use crate::types::SynthesisRequest;
use crate::{Error, ErrorContext, Result};

/// Maximum accepted text length, in characters (inclusive).
pub const MAX_TEXT_CHARS: usize = 4096;

/// Accepted playback speed multipliers.
pub const SPEED_RANGE: RangeInclusive<f32> = 0.25..=4.0;

/// Validate a request before any provider is resolved.
pub fn validate_request(request: &SynthesisRequest) -> Result<()> {
    if request.text.trim().is_empty() {
        return Err(Error::missing_input_with_context(
            "Text is required",
            ErrorContext::new()
                .with_field_path("request.text")
                .with_source("request_validator"),
        ));
    }

    let len = request.text.chars().count();
    if len > MAX_TEXT_CHARS {
        return Err(Error::text_too_long(len, MAX_TEXT_CHARS));
    }

    if let Some(speed) = request.speed {
        if !speed.is_finite() || !SPEED_RANGE.contains(&speed) {
            return Err(Error::missing_input_with_context(
                format!("Unsupported speed: {}", speed),
                ErrorContext::new()
                    .with_field_path("request.speed")
                    .with_details(format!(
                        "expected {} to {}",
                        SPEED_RANGE.start(),
                        SPEED_RANGE.end()
                    ))
                    .with_source("request_validator"),
            ));
        }
    }

    Ok(())
}
