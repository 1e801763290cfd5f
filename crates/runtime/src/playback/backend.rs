//! Raw audio capabilities behind the playback policy.
//!
//! A backend plays recorded clips, synthesizes speech and fires sound effects.
//! It reports failures honestly; [`super::AudioService`] decides what to do
//! about them.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::SfxKind;

/// Identifies a recorded clip.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClipId {
    Letter(char),
    Word(String),
    /// Named phrase, e.g. `greeting` or `encouragement/great-job`.
    Phrase(String),
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipId::Letter(ch) => write!(f, "letter/{}", ch),
            ClipId::Word(word) => write!(f, "word/{}", word),
            ClipId::Phrase(key) => write!(f, "phrase/{}", key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("audio output is blocked until a user gesture unlocks it")]
    Blocked,

    #[error("failed to decode clip {clip}")]
    Decode { clip: String },

    #[error("speech synthesis unavailable")]
    SynthesisUnavailable,

    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Audio capabilities of a host platform.
#[async_trait]
pub trait NarrationBackend: Send + Sync {
    /// Performs the platform's autoplay unlock.
    fn unlock(&self) -> Result<(), PlaybackError>;

    /// Stops all narration clips and speech.
    fn stop(&self);

    fn play_effect(&self, kind: SfxKind) -> Result<(), PlaybackError>;

    /// Starts a recorded clip and returns its length.
    ///
    /// `Ok(None)` means no recording exists for `clip`.
    async fn play_clip(&self, clip: &ClipId) -> Result<Option<Duration>, PlaybackError>;

    /// Starts speaking `text` at `rate`. Does not wait for the utterance.
    fn speak(&self, text: &str, rate: f32) -> Result<(), PlaybackError>;
}

/// Backend with no output at all. Every clip is missing and speech is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentBackend;

#[async_trait]
impl NarrationBackend for SilentBackend {
    fn unlock(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn stop(&self) {}

    fn play_effect(&self, _kind: SfxKind) -> Result<(), PlaybackError> {
        Ok(())
    }

    async fn play_clip(&self, _clip: &ClipId) -> Result<Option<Duration>, PlaybackError> {
        Ok(None)
    }

    fn speak(&self, _text: &str, _rate: f32) -> Result<(), PlaybackError> {
        Ok(())
    }
}

/// Headless backend that narrates into the log.
///
/// Has no recordings, so every cue goes through the speech path and the
/// fallback timings.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingBackend;

#[async_trait]
impl NarrationBackend for TracingBackend {
    fn unlock(&self) -> Result<(), PlaybackError> {
        tracing::info!(target: "speller::audio", "audio unlocked");
        Ok(())
    }

    fn stop(&self) {
        tracing::debug!(target: "speller::audio", "narration stopped");
    }

    fn play_effect(&self, kind: SfxKind) -> Result<(), PlaybackError> {
        tracing::info!(target: "speller::audio", "♪ {}", kind);
        Ok(())
    }

    async fn play_clip(&self, _clip: &ClipId) -> Result<Option<Duration>, PlaybackError> {
        Ok(None)
    }

    fn speak(&self, text: &str, rate: f32) -> Result<(), PlaybackError> {
        tracing::info!(target: "speller::audio", rate, "🗣 {}", text);
        Ok(())
    }
}
