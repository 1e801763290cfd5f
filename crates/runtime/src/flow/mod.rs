//! Narration-driven game flow.
//!
//! The flow walks a strict phase machine
//! (`LOCKED → GREETING → SHOWING → INTRO → PLAYING → CELEBRATING → SHOWING …`)
//! and drives the puzzle and the playback service through narration scripts.
//! A single [`crate::SequenceController`] ensures at most one narration run
//! is live; starting a run stops audio and clears highlights for the one it
//! replaces.

mod controller;
mod narration;
mod phase;

pub use controller::{DropOutcome, GameFlow, GameFlowBuilder};
pub use phase::{FlowPhase, FlowState};
