//! Narration phrase texts.
//!
//! The runtime prefers recorded clips; these texts are what speech synthesis
//! says when no recording exists.

/// One encouragement line. `key` names the recorded clip, `text` is the
/// synthesized fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncouragementLine {
    pub key: String,
    pub text: String,
}

impl EncouragementLine {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// Texts for every narration phrase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhraseCatalog {
    pub greeting: String,
    pub is_spelled: String,
    pub encouragements: Vec<EncouragementLine>,
}

impl PhraseCatalog {
    pub const DEFAULT_GREETING: &'static str = "Hello, little speller!";
    pub const DEFAULT_IS_SPELLED: &'static str = "is spelled";
}

impl Default for PhraseCatalog {
    fn default() -> Self {
        Self {
            greeting: Self::DEFAULT_GREETING.to_string(),
            is_spelled: Self::DEFAULT_IS_SPELLED.to_string(),
            encouragements: vec![
                EncouragementLine::new("great-job", "Great job!"),
                EncouragementLine::new("you-did-it", "You did it!"),
                EncouragementLine::new("awesome", "Awesome spelling!"),
                EncouragementLine::new("keep-going", "Keep going, you're doing great!"),
            ],
        }
    }
}
