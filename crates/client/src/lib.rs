//! Headless demo host for the spelling game.
//!
//! Wires a [`speller_runtime::GameFlow`] to a log-only narration backend and
//! lets a scripted child play it:
//! - [`config`] reads the session settings from the environment
//! - [`logging`] installs stderr and file logging
//! - [`autoplay`] drives the flow like a touch UI would

pub mod autoplay;
pub mod config;
pub mod logging;

pub use autoplay::SessionReport;
pub use config::CliConfig;
