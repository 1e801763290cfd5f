//! Fallback pacing for narration audio.

use std::time::Duration;

/// Conservative minimum durations used when a clip's real length is unknown
/// (synthesized speech, missing metadata, or a failed backend).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinDurations {
    pub letter: Duration,
    pub word: Duration,
    pub phrase: Duration,
    pub greeting: Duration,
    pub encouragement: Duration,
}

impl Default for MinDurations {
    fn default() -> Self {
        Self {
            letter: Duration::from_millis(350),
            word: Duration::from_millis(500),
            phrase: Duration::from_millis(900),
            greeting: Duration::from_millis(2200),
            encouragement: Duration::from_millis(1400),
        }
    }
}

/// Silence appended after each category before the next cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Buffers {
    pub letter_after: Duration,
    pub phrase_after: Duration,
    pub greeting_after: Duration,
    pub encouragement_after: Duration,
}

impl Default for Buffers {
    fn default() -> Self {
        Self {
            letter_after: Duration::from_millis(220),
            phrase_after: Duration::from_millis(250),
            greeting_after: Duration::from_millis(350),
            encouragement_after: Duration::from_millis(250),
        }
    }
}

/// Timing policy of the [`super::AudioService`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AudioTiming {
    pub min_durations: MinDurations,
    pub buffers: Buffers,
}
