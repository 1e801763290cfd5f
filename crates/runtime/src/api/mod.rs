//! Public runtime API surface.
//!
//! Gathers the types exposed to consumers of the runtime crate so the flow
//! and playback modules can stay focused on orchestration.

pub mod errors;

pub use errors::{Result, RuntimeError};
