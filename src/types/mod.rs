//! 类型模块：语音合成请求、结果、音频格式与音色描述。
//!
//! # Types Module
//!
//! Provider-neutral value types shared by the orchestrator and every adapter.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SynthesisRequest`] | Text plus optional voice, format and speed |
//! | [`SynthesisResult`] | Owned audio bytes and their MIME type |
//! | [`AudioFormat`] | Closed set of output formats with MIME mapping |
//! | [`VoiceDescriptor`] | One entry of a provider's static voice catalog |
//!
//! ## Example
//!
//! ```rust
//! use tts_gateway::types::{AudioFormat, SynthesisRequest};
//!
//! let request = SynthesisRequest::new("Hello there")
//!     .with_voice("nova")
//!     .with_format(AudioFormat::Opus);
//! assert_eq!(request.format_or_default().mime_type(), "audio/opus");
//! ```

pub mod audio;
pub mod request;
pub mod voice;

pub use audio::{AudioFormat, SynthesisResult};
pub use request::SynthesisRequest;
pub use voice::VoiceDescriptor;
