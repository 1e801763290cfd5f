//! Screen-space value types shared by letters, slots and layout.

use crate::config::PuzzleConfig;

/// A 2D position in container pixels (top-left origin).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Measured rectangle of a slot, as reported by the layout subsystem.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotGeometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SlotGeometry {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner of the slot.
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Lays out `count` tile-sized slots in a single row centered inside the
    /// word-display band.
    ///
    /// Hosts without a measuring layout engine (the headless client, tests)
    /// use this in place of real measurements.
    pub fn row(count: usize, layout: &Layout, config: &PuzzleConfig) -> Vec<Self> {
        let size = config.letter_size;
        let gap = config.letter_padding / 2.0;
        let total = count as f32 * size + count.saturating_sub(1) as f32 * gap;
        let start_x = ((layout.width - total) / 2.0).max(0.0);
        let (band_top, band_bottom) = layout.word_band(config);
        let y = band_top + ((band_bottom - band_top) - size).max(0.0) / 2.0;

        (0..count)
            .map(|i| Self::new(start_x + i as f32 * (size + gap), y, size, size))
            .collect()
    }
}

/// Container dimensions reported by the layout subsystem.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub is_landscape: bool,
}

impl Layout {
    pub const fn new(width: f32, height: f32, is_landscape: bool) -> Self {
        Self {
            width,
            height,
            is_landscape,
        }
    }

    /// Center of the container, where fresh letters appear.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Vertical extent `(top, bottom)` of the word-display band.
    pub fn word_band(&self, config: &PuzzleConfig) -> (f32, f32) {
        (
            self.height * config.word_band_top,
            self.height * config.word_band_bottom,
        )
    }
}
