//! Runtime configuration shared by the flow controller and playback.
use std::env;
use std::time::Duration;

use speller_core::PuzzleConfig;

use crate::playback::AudioTiming;

/// Fixed pauses and speech rates of the narration scripts.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowPacing {
    /// Pause before the celebration sound effect.
    pub celebration_lead_in: Duration,
    /// Pause after the celebration sound effect.
    pub celebration_after_sfx: Duration,
    /// Pause after the celebration walkthrough, before the next word.
    pub celebration_tail: Duration,
    /// Pause between intro completion and scattering the letters.
    pub intro_settle: Duration,
    /// Pause after the whole word is highlighted and spoken.
    pub highlight_gap: Duration,
    pub word_rate: f32,
    /// Slightly slower closing word in the intro walkthrough.
    pub intro_closing_rate: f32,
    /// Encouragement plays on completed words 1, 1 + n, 1 + 2n, ...
    pub encourage_every: u32,
}

impl FlowPacing {
    pub const DEFAULT_CELEBRATION_LEAD_IN: Duration = Duration::from_millis(1_000);
    pub const DEFAULT_CELEBRATION_AFTER_SFX: Duration = Duration::from_millis(1_000);
    pub const DEFAULT_CELEBRATION_TAIL: Duration = Duration::from_millis(800);
    pub const DEFAULT_INTRO_SETTLE: Duration = Duration::from_millis(200);
    pub const DEFAULT_HIGHLIGHT_GAP: Duration = Duration::from_millis(150);
    pub const DEFAULT_WORD_RATE: f32 = 0.75;
    pub const DEFAULT_INTRO_CLOSING_RATE: f32 = 0.78;
    pub const DEFAULT_ENCOURAGE_EVERY: u32 = 3;

    /// Whether the celebration for the `words_completed`-th word says an
    /// encouragement line.
    pub fn encourages(&self, words_completed: u32) -> bool {
        words_completed >= 1 && (words_completed - 1) % self.encourage_every.max(1) == 0
    }
}

impl Default for FlowPacing {
    fn default() -> Self {
        Self {
            celebration_lead_in: Self::DEFAULT_CELEBRATION_LEAD_IN,
            celebration_after_sfx: Self::DEFAULT_CELEBRATION_AFTER_SFX,
            celebration_tail: Self::DEFAULT_CELEBRATION_TAIL,
            intro_settle: Self::DEFAULT_INTRO_SETTLE,
            highlight_gap: Self::DEFAULT_HIGHLIGHT_GAP,
            word_rate: Self::DEFAULT_WORD_RATE,
            intro_closing_rate: Self::DEFAULT_INTRO_CLOSING_RATE,
            encourage_every: Self::DEFAULT_ENCOURAGE_EVERY,
        }
    }
}

/// Runtime configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub puzzle: PuzzleConfig,
    pub audio: AudioTiming,
    pub pacing: FlowPacing,
    pub event_buffer_size: usize,
    /// Seed for scatter placement and word order. Random when unset.
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SPELLER_SEED` - Deterministic seed (default: random)
    /// - `SPELLER_EVENT_BUFFER` - Flow event channel capacity (default: 100)
    /// - `SPELLER_ENCOURAGE_EVERY` - Encouragement cadence in words (default: 3)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("SPELLER_SEED");

        if let Some(capacity) = read_env::<usize>("SPELLER_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(every) = read_env::<u32>("SPELLER_ENCOURAGE_EVERY") {
            config.pacing.encourage_every = every.max(1);
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            puzzle: PuzzleConfig::default(),
            audio: AudioTiming::default(),
            pacing: FlowPacing::default(),
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER_SIZE,
            seed: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encouragement_cadence_is_offset_by_one() {
        let pacing = FlowPacing::default();
        let encouraged: Vec<u32> = (0..=10).filter(|&n| pacing.encourages(n)).collect();
        assert_eq!(encouraged, vec![1, 4, 7, 10]);
    }

    #[test]
    fn zero_cadence_does_not_divide_by_zero() {
        let pacing = FlowPacing {
            encourage_every: 0,
            ..FlowPacing::default()
        };
        assert!(pacing.encourages(1));
        assert!(pacing.encourages(2));
        assert!(!pacing.encourages(0));
    }
}
