//! Static voice catalog entries.

use serde::Serialize;

/// One selectable synthetic voice of a provider.
///
/// Catalogs are `'static` slices owned by each driver; entries are never
/// mutated after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VoiceDescriptor {
    /// Provider-native voice name, sent on the wire.
    pub id: &'static str,
    /// Display name.
    pub label: &'static str,
}

impl VoiceDescriptor {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }

    /// Case-insensitive match against a caller-supplied voice id.
    pub fn matches(&self, voice: &str) -> bool {
        self.id.eq_ignore_ascii_case(voice.trim())
    }
}
