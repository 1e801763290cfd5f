//! Letter tiles and the slots they are dragged into.

use core::fmt;

use super::geometry::{Point, SlotGeometry};

/// Stable identifier of a letter tile, unique within one word instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterId(pub u32);

impl fmt::Display for LetterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "letter-{}", self.0)
    }
}

/// One scrambled tile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Letter {
    pub id: LetterId,
    pub char: char,
    /// Slot this letter must occupy to be correct.
    pub correct_slot_index: usize,
    pub color: String,
    /// Current display position; moves while dragged, on placement and on reveal.
    pub position: Point,
    /// Resting point chosen at word init; never changes afterwards.
    pub target_scatter_position: Point,
    /// Flips false → true exactly once.
    pub placed: bool,
    pub slot_index: Option<usize>,
}

/// One destination position for a letter.
///
/// `filled` is true iff `occupying_letter_id` is set. Geometry stays zeroed
/// until the layout subsystem reports measurements.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub index: usize,
    pub expected_char: char,
    pub filled: bool,
    pub occupying_letter_id: Option<LetterId>,
    pub geometry: SlotGeometry,
}

impl Slot {
    pub(crate) fn empty(index: usize, expected_char: char) -> Self {
        Self {
            index,
            expected_char,
            filled: false,
            occupying_letter_id: None,
            geometry: SlotGeometry::default(),
        }
    }

    /// Case-insensitive character check used by placement.
    pub fn accepts(&self, ch: char) -> bool {
        self.expected_char.to_lowercase().eq(ch.to_lowercase())
    }
}
