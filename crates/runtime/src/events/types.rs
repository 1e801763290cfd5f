use serde::{Deserialize, Serialize};

use speller_core::LetterId;

use crate::flow::FlowPhase;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FlowEvent {
    PhaseChanged {
        from: FlowPhase,
        to: FlowPhase,
    },

    SequenceStarted {
        id: u64,
        label: String,
    },

    /// A narration run was superseded or cancelled outright.
    SequenceCancelled {
        label: String,
    },

    WordStarted {
        word: String,
        words_completed: u32,
    },

    LetterPlaced {
        letter: LetterId,
        slot: usize,
        /// The drop completed the word.
        completed: bool,
    },

    LetterRejected {
        letter: LetterId,
        slot: usize,
    },
}
