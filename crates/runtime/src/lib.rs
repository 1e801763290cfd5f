//! Narration orchestration for the spelling game.
//!
//! This crate wires the puzzle engine to audio narration. Hosts build a
//! [`GameFlow`], forward taps, layout measurements and letter drops to it,
//! and render the [`FlowState`] and [`speller_core::PuzzleState`] snapshots
//! it publishes.
//!
//! Modules are organized by responsibility:
//! - [`flow`] hosts the phase machine, narration scripts and builder
//! - [`sequence`] provides cancellable narration runs and the step interpreter
//! - [`playback`] hides recorded clips versus speech synthesis
//! - [`events`] broadcasts flow events to observers
//! - [`api`] and [`config`] expose errors and tunables
pub mod api;
pub mod config;
pub mod events;
pub mod flow;
pub mod playback;
pub mod sequence;

pub use api::{Result, RuntimeError};
pub use config::{FlowPacing, RuntimeConfig};
pub use events::{EventBus, FlowEvent};
pub use flow::{DropOutcome, FlowPhase, FlowState, GameFlow, GameFlowBuilder};
pub use playback::{
    AudioService, AudioTiming, NarrationBackend, PhraseKey, PlaybackError, PlaybackService,
    PlaybackTiming, SfxKind, SilentBackend, TracingBackend, WordOptions,
};
pub use sequence::{Sequence, SequenceController};
