//! Puzzle state representation.
//!
//! This module owns the plain data the UI renders: the current word, its
//! letters and slots, the puzzle phase and the placement bookkeeping. Hosts
//! clone or query this state but mutate it exclusively through
//! [`crate::Puzzle`].
mod geometry;
mod tiles;

pub use geometry::{Layout, Point, SlotGeometry};
pub use tiles::{Letter, LetterId, Slot};

/// Puzzle-level phase, independent of the narration flow phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PuzzlePhase {
    /// Between words; nothing to render yet.
    #[default]
    Loading,
    /// Word initialized, letters shown in (or heading to) their slots.
    Showing,
    /// Letters scattered; the child is dragging.
    Playing,
    /// Every letter sits in its correct slot.
    Celebrating,
}

/// Canonical snapshot of one puzzle round.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleState {
    pub current_word: String,
    /// Index-aligned with the characters of `current_word`.
    pub letters: Vec<Letter>,
    /// Index-aligned with the characters of `current_word`.
    pub slots: Vec<Slot>,
    pub phase: PuzzlePhase,
    pub words_completed: u32,
    /// Letter ids in the order they were correctly placed.
    pub placement_order: Vec<LetterId>,
}

impl PuzzleState {
    pub fn letter(&self, id: LetterId) -> Option<&Letter> {
        self.letters.iter().find(|letter| letter.id == id)
    }

    pub(crate) fn letter_mut(&mut self, id: LetterId) -> Option<&mut Letter> {
        self.letters.iter_mut().find(|letter| letter.id == id)
    }

    /// True once every letter of a non-empty word is placed.
    pub fn all_placed(&self) -> bool {
        !self.letters.is_empty() && self.letters.iter().all(|letter| letter.placed)
    }
}
