//! Word puzzle logic for the spelling game.
//!
//! `speller-core` defines the puzzle rules (slots, letters, scatter placement,
//! letter → slot matching) and exposes pure, synchronous APIs that the
//! narration runtime drives. All state mutation flows through [`Puzzle`];
//! hosts render [`PuzzleState`] snapshots.
pub mod config;
pub mod deck;
pub mod env;
pub mod error;
pub mod puzzle;
pub mod state;

pub use config::PuzzleConfig;
pub use deck::WordDeck;
pub use env::{PcgRng, RandomSource};
pub use error::WordDeckError;
pub use puzzle::{IgnoreReason, NarratedLetter, Placement, Puzzle, natural_order};
pub use state::{
    Layout, Letter, LetterId, Point, PuzzlePhase, PuzzleState, Slot, SlotGeometry,
};
