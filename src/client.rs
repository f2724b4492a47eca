//! Speech client: the single public entry point of the gateway.
//!
//! Keep the public surface small and predictable. Implementation details are
//! split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod validation;

pub use builder::SpeechClientBuilder;
pub use core::{render_outcome, SpeechClient};
pub use validation::{validate_request, MAX_TEXT_CHARS};
