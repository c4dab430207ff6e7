//! Speaker index for resolving speaker ids to script identifiers
//!
//! Built once from the character records. Lookups never fail: an unknown
//! speaker resolves to the empty name, which the emitter writes as narration.

use std::collections::HashMap;

use super::types::Character;

/// Turn a display name into a script identifier
///
/// Lowercases and replaces anything that is not alphanumeric with `_`, so
/// `"Old Tom"` becomes `old_tom`. Both the scene emitter and the character
/// declarations go through this function.
#[must_use]
pub fn script_ident(name: &str) -> String {
    let ident: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .to_lowercase();

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{ident}")
    } else {
        ident
    }
}

/// Whether a speaker id means "nobody" (empty or an all-zero articy id)
#[must_use]
pub fn is_null_speaker(id: &str) -> bool {
    let digits = id.strip_prefix("0x").unwrap_or(id);
    digits.chars().all(|c| c == '0')
}

/// Speaker id → script identifier
#[derive(Debug, Clone, Default)]
pub struct SpeakerIndex {
    names: HashMap<String, String>,
}

impl SpeakerIndex {
    /// Build the index from character records
    #[must_use]
    pub fn from_characters(characters: &[Character]) -> Self {
        let names = characters
            .iter()
            .map(|character| (character.speaker.clone(), script_ident(&character.name)))
            .collect();
        Self { names }
    }

    /// Number of known speakers
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    /// Look up a speaker's script identifier
    #[must_use]
    pub fn get(&self, speaker_id: &str) -> Option<&str> {
        self.names.get(speaker_id).map(String::as_str)
    }

    /// Resolve a speaker id, degrading to the empty (narrator) name
    #[must_use]
    pub fn resolve(&self, speaker_id: &str) -> &str {
        self.get(speaker_id).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_ident() {
        assert_eq!(script_ident("Faye"), "faye");
        assert_eq!(script_ident("Old Tom"), "old_tom");
        assert_eq!(script_ident(" Mr. Smith "), "mr__smith");
        assert_eq!(script_ident("2B"), "_2b");
    }

    #[test]
    fn test_null_speaker() {
        assert!(is_null_speaker(""));
        assert!(is_null_speaker("0x0000000000000000"));
        assert!(!is_null_speaker("0x0100000000000A3C"));
    }

    #[test]
    fn test_speaker_index_basic() {
        let index = SpeakerIndex::from_characters(&[Character {
            name: "Faye".to_string(),
            color: "ff00ff".to_string(),
            speaker: "0x01".to_string(),
        }]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("0x01"), Some("faye"));
        assert_eq!(index.resolve("0x02"), "");
    }
}
