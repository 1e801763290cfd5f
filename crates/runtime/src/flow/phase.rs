//! Flow phases and the flow state snapshot.

use serde::{Deserialize, Serialize};

/// Phase of the narration flow.
///
/// Transitions follow a fixed table; a request outside it is rejected and
/// leaves the phase unchanged.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowPhase {
    /// Waiting for the first tap; audio is still locked.
    #[default]
    Locked,
    Greeting,
    /// A word is on screen and waiting for its intro.
    Showing,
    Intro,
    Playing,
    Celebrating,
}

impl FlowPhase {
    /// Phases reachable from `self` in one step.
    pub const fn successors(self) -> &'static [FlowPhase] {
        use FlowPhase::*;
        match self {
            Locked => &[Greeting],
            Greeting => &[Showing, Locked],
            Showing => &[Intro, Playing],
            Intro => &[Playing, Showing],
            Playing => &[Celebrating],
            Celebrating => &[Showing],
        }
    }

    pub fn can_transition_to(self, next: FlowPhase) -> bool {
        self.successors().contains(&next)
    }
}

/// Snapshot of the flow controller, published on every change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    pub flow_phase: FlowPhase,
    pub celebrating: bool,
    /// Slot highlighted while its letter is narrated.
    pub active_narration_slot: Option<usize>,
    pub word_highlight_active: bool,
    pub last_celebrated_word: Option<String>,
    pub intro_running: bool,
    pub intro_completed_word: Option<String>,
    /// Layout has measured the current word's slots.
    pub slots_ready_for_word: bool,
    pub initial_greeting_playing: bool,
}

impl FlowState {
    /// Moves to `next` if the transition table allows it.
    pub fn transition(&mut self, next: FlowPhase) -> bool {
        if !self.flow_phase.can_transition_to(next) {
            return false;
        }
        self.flow_phase = next;
        true
    }

    pub fn clear_highlights(&mut self) {
        self.active_narration_slot = None;
        self.word_highlight_active = false;
    }

    /// Resets the per-word flags ahead of a fresh word.
    pub(crate) fn reset_for_word(&mut self) {
        self.last_celebrated_word = None;
        self.intro_completed_word = None;
        self.slots_ready_for_word = false;
        self.clear_highlights();
    }
}
