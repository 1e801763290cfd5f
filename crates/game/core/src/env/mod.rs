//! Environment services the puzzle consumes but does not own the policy of.
//!
//! Currently only randomness: scatter sampling and deck shuffles draw from a
//! [`RandomSource`] so hosts can inject a seeded generator.
mod rng;

pub use rng::{PcgRng, RandomSource, shuffle};
