//! Seedable random source for scatter placement and word shuffling.
//!
//! The puzzle never reaches for a global RNG: every random draw goes through a
//! [`RandomSource`] owned by the [`crate::Puzzle`]. Seeding the source makes a
//! whole session (word order, scatter layout, tile assignment) reproducible,
//! which the tests rely on.

/// Source of uniformly distributed random values.
///
/// Only [`RandomSource::next_u32`] is required; everything else is derived.
pub trait RandomSource: Send {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_f32(&mut self) -> f32 {
        // 24 significant bits keep the result strictly below 1.0.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform integer in `[0, bound)`. Returns 0 when `bound` is 0.
    ///
    /// Lemire's multiply-shift with rejection, so no value is favored.
    /// `bound` must fit in a `u32`.
    fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let bound = u32::try_from(bound).unwrap_or(u32::MAX);
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let wide = u64::from(self.next_u32()) * u64::from(bound);
            if (wide as u32) >= threshold {
                return (wide >> 32) as usize;
            }
        }
    }

    /// Uniform float in `[min, max)`. Returns `min` for empty or inverted ranges.
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + self.next_f32() * (max - min)
    }
}

/// Fisher-Yates shuffle in place.
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64 bits of state, 32 bits of output per step.
/// Same seed always produces the same stream.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a seed.
    pub fn seeded(seed: u64) -> Self {
        // Advance once so that small seeds (0, 1, 2...) do not share a prefix.
        Self {
            state: Self::pcg_step(seed.wrapping_add(Self::INCREMENT)),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}
