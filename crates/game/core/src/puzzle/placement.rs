//! Outcomes of dropping a letter on a slot.

use crate::state::Point;

/// What a drop did to the puzzle.
///
/// Callers may ignore this entirely; invalid drops are no-ops either way.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Letter locked into the slot. `completed` is true when it was the last one.
    Placed { completed: bool },
    /// Wrong character; the letter was moved just below the slot.
    Rejected { relocated_to: Point },
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl Placement {
    pub const fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    pub const fn completed_word(&self) -> bool {
        matches!(self, Self::Placed { completed: true })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    UnknownLetter,
    UnknownSlot,
    SlotFilled,
    AlreadyPlaced,
}

/// One entry of the narration letter order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NarratedLetter {
    pub char: char,
    /// Slot to highlight while the letter is spoken.
    pub slot_index: usize,
}
