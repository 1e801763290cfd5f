//! Narration playback abstraction.
//!
//! [`PlaybackService`] is the only audio surface the flow controller sees:
//! "play this letter / word / phrase / effect" and, for narration, how long
//! to wait before the next cue. Whether the sound came from a recorded clip
//! or speech synthesis, and whether its exact length was known, stays behind
//! the trait. [`AudioService`] implements the policy on top of a raw
//! [`NarrationBackend`].

mod audio;
mod backend;
mod timing;

pub use audio::AudioService;
pub use backend::{ClipId, NarrationBackend, PlaybackError, SilentBackend, TracingBackend};
pub use timing::{AudioTiming, Buffers, MinDurations};

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How long narration audio lasts and how much silence to leave after it.
///
/// Returned once playback has *started*; callers wait out
/// [`PlaybackTiming::total`] themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackTiming {
    pub duration: Duration,
    pub buffer: Duration,
}

impl PlaybackTiming {
    pub const NONE: Self = Self {
        duration: Duration::ZERO,
        buffer: Duration::ZERO,
    };

    pub const fn new(duration: Duration, buffer: Duration) -> Self {
        Self { duration, buffer }
    }

    pub fn total(&self) -> Duration {
        self.duration + self.buffer
    }
}

/// Options for speaking a whole word.
#[derive(Clone, Debug, PartialEq)]
pub struct WordOptions {
    /// Speech rate (1.0 = normal).
    pub rate: f32,
    /// Text to say instead of the bare word (e.g. `"cat."` for a falling tone).
    pub override_text: Option<String>,
}

impl WordOptions {
    pub const DEFAULT_RATE: f32 = 0.75;

    pub fn with_rate(rate: f32) -> Self {
        Self {
            rate,
            override_text: None,
        }
    }

    pub fn override_text(mut self, text: impl Into<String>) -> Self {
        self.override_text = Some(text.into());
        self
    }
}

impl Default for WordOptions {
    fn default() -> Self {
        Self::with_rate(Self::DEFAULT_RATE)
    }
}

/// Narration phrases.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum PhraseKey {
    Greeting,
    IsSpelled,
    Encouragement,
}

/// Fire-and-forget sound effects.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum SfxKind {
    /// Letter snapped into its slot.
    Pop,
    /// Letter rejected by a slot.
    Thud,
    /// Word completed.
    Celebration,
}

/// Uniform narration contract.
///
/// Implementations never fail: playback problems degrade to fallback timings.
#[async_trait]
pub trait PlaybackService: Send + Sync {
    /// Unlocks audio output. Call synchronously from the user-gesture handler
    /// before anything else; repeated calls are no-ops.
    fn unlock_audio(&self);

    /// Halts any in-flight narration immediately.
    fn stop_narration(&self);

    /// Plays a sound effect without timing bookkeeping.
    fn play_sfx(&self, kind: SfxKind);

    async fn play_letter(&self, letter: char) -> PlaybackTiming;

    async fn play_word(&self, word: &str, options: WordOptions) -> PlaybackTiming;

    async fn play_phrase(&self, key: PhraseKey) -> PlaybackTiming;
}
