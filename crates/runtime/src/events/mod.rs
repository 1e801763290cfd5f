//! Flow events for hosts and observers.
//!
//! The flow controller publishes a [`FlowEvent`] for every phase change,
//! narration run start or cancellation, word start and letter drop.
//! Snapshots of the full state travel separately over `watch` channels.

mod bus;
mod types;

pub use bus::EventBus;
pub use types::FlowEvent;
