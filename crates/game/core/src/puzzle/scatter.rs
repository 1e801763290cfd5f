//! Non-overlapping scatter placement.
//!
//! Letters rest above and below the word-display band, alternating zones when
//! both have room. Each position is sampled until it clears every previous
//! position by one tile, up to `scatter_attempts` samples; the last sample is
//! then accepted regardless so generation always terminates.

use crate::config::PuzzleConfig;
use crate::env::RandomSource;
use crate::state::{Layout, Point};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Zone {
    y_min: f32,
    y_max: f32,
}

impl Zone {
    fn height(&self) -> f32 {
        self.y_max - self.y_min
    }
}

/// Generates `count` scatter positions inside `layout`.
pub(crate) fn scatter_positions<R: RandomSource + ?Sized>(
    count: usize,
    layout: &Layout,
    config: &PuzzleConfig,
    rng: &mut R,
) -> Vec<Point> {
    let size = config.letter_size;
    let pad = config.letter_padding;
    let (band_top, band_bottom) = layout.word_band(config);

    let top = Zone {
        y_min: pad,
        y_max: pad.max(band_top - size - pad),
    };
    let bottom = Zone {
        y_min: band_bottom + pad,
        y_max: (band_bottom + pad).max(layout.height - size - pad),
    };
    // Very small containers: fall back to the full height.
    let whole = Zone {
        y_min: pad,
        y_max: layout.height - size - pad,
    };
    let use_top = top.height() > size;
    let use_bottom = bottom.height() > size;

    let x_min = pad;
    let x_max = pad.max(layout.width - size - pad);

    let mut positions: Vec<Point> = Vec::with_capacity(count);
    for i in 0..count {
        let zone = match (use_top, use_bottom) {
            (true, true) if i % 2 == 0 => top,
            (true, true) => bottom,
            (true, false) => top,
            (false, true) => bottom,
            (false, false) => whole,
        };

        let mut attempts = 0;
        let candidate = loop {
            let candidate = Point::new(
                rng.range_f32(x_min, x_max),
                rng.range_f32(zone.y_min, zone.y_max),
            );
            attempts += 1;
            let overlaps = positions.iter().any(|p| {
                (p.x - candidate.x).abs() < size && (p.y - candidate.y).abs() < size
            });
            if !overlaps || attempts >= config.scatter_attempts {
                break candidate;
            }
        };
        positions.push(candidate);
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn roomy_layout_produces_no_overlaps() {
        let config = PuzzleConfig::default();
        let layout = Layout::new(1024.0, 768.0, true);
        let mut rng = PcgRng::seeded(17);

        let positions = scatter_positions(5, &layout, &config, &mut rng);
        assert_eq!(positions.len(), 5);
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                let clear = (a.x - b.x).abs() >= config.letter_size
                    || (a.y - b.y).abs() >= config.letter_size;
                assert!(clear, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn alternates_above_and_below_the_band() {
        let config = PuzzleConfig::default();
        let layout = Layout::new(1024.0, 768.0, true);
        let (band_top, band_bottom) = layout.word_band(&config);
        let mut rng = PcgRng::seeded(3);

        let positions = scatter_positions(4, &layout, &config, &mut rng);
        for (i, p) in positions.iter().enumerate() {
            if i % 2 == 0 {
                assert!(p.y + config.letter_size <= band_top, "letter {i} not above band");
            } else {
                assert!(p.y >= band_bottom, "letter {i} not below band");
            }
        }
    }

    #[test]
    fn stays_inside_container() {
        let config = PuzzleConfig::default();
        let layout = Layout::new(400.0, 700.0, false);
        let mut rng = PcgRng::seeded(23);

        for p in scatter_positions(8, &layout, &config, &mut rng) {
            assert!(p.x >= config.letter_padding);
            assert!(p.x <= layout.width - config.letter_size - config.letter_padding);
            assert!(p.y >= config.letter_padding);
            assert!(p.y <= layout.height - config.letter_size - config.letter_padding);
        }
    }

    #[test]
    fn crowded_layout_still_terminates() {
        let config = PuzzleConfig::default();
        let layout = Layout::new(120.0, 120.0, false);
        let mut rng = PcgRng::seeded(1);

        let positions = scatter_positions(12, &layout, &config, &mut rng);
        assert_eq!(positions.len(), 12);
    }
}
