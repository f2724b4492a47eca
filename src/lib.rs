//! # tts-gateway
//!
//! 与厂商无关的语音合成网关：校验请求、选择 Provider、调用其 HTTP API，并返回统一的音频结果或类型化错误。
//!
//! Provider-agnostic text-to-speech gateway. Given text and synthesis options, it
//! selects the configured external TTS provider, invokes that provider's HTTP API,
//! and returns a normalized audio payload (raw bytes + MIME type) or a typed error.
//!
//! ## Flow
//!
//! ```text
//! SpeechClient::generate_speech
//!   -> validate_request        (TEXT_TOO_LONG / MISSING_INPUT, no I/O)
//!   -> defaults                (first catalog voice, mp3)
//!   -> registry::resolve_adapter (CONFIGURATION_ERROR, no I/O)
//!   -> SpeechDriver::synthesize  (one HTTP request, PROVIDER_ERROR)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tts_gateway::{SpeechClient, SynthesisRequest};
//!
//! #[tokio::main]
//! async fn main() -> tts_gateway::Result<()> {
//!     // TTS_PROVIDER=openai, OPENAI_API_KEY=...
//!     let client = SpeechClient::from_env()?;
//!     let audio = client
//!         .generate_speech(&SynthesisRequest::new("Hello there").with_voice("nova"))
//!         .await?;
//!     println!("{} bytes of {}", audio.audio_buffer.len(), audio.content_type);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Orchestrator, builder, request validation |
//! | [`config`] | Immutable provider configuration |
//! | [`registry`] | Provider lookup and voice catalogs |
//! | [`drivers`] | Per-provider request building and response parsing |
//! | [`transport`] | Single-shot HTTP execution |
//! | [`types`] | Requests, results, formats, voices |
//! | [`error_code`] | Fixed error code set |

pub mod client;
pub mod config;
pub mod drivers;
pub mod error_code;
pub mod registry;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{render_outcome, validate_request, SpeechClient, SpeechClientBuilder};
pub use config::{ProviderConfig, ProviderKind};
pub use error_code::ErrorCode;
pub use types::{AudioFormat, SynthesisRequest, SynthesisResult, VoiceDescriptor};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorPayload};
