/// Puzzle geometry constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleConfig {
    /// Edge length of a letter tile, in container pixels.
    pub letter_size: f32,
    /// Minimum distance kept between tiles and the container edges.
    pub letter_padding: f32,
    /// Top of the word-display band as a fraction of container height.
    pub word_band_top: f32,
    /// Bottom of the word-display band as a fraction of container height.
    pub word_band_bottom: f32,
    /// Samples drawn per letter before an overlapping position is accepted anyway.
    pub scatter_attempts: u32,
    /// Gap between a slot's bottom edge and a rejected letter.
    pub rejected_drop_offset: f32,
    /// Tile colors, assigned round-robin by letter index.
    pub palette: Vec<String>,
}

impl PuzzleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LETTER_SIZE: f32 = 70.0;
    pub const DEFAULT_LETTER_PADDING: f32 = 20.0;
    pub const DEFAULT_WORD_BAND_TOP: f32 = 0.35;
    pub const DEFAULT_WORD_BAND_BOTTOM: f32 = 0.55;
    pub const DEFAULT_SCATTER_ATTEMPTS: u32 = 50;
    pub const DEFAULT_REJECTED_DROP_OFFSET: f32 = 20.0;

    /// Bright, kid-friendly tile colors.
    pub const DEFAULT_PALETTE: [&'static str; 10] = [
        "#FF6B6B", // red
        "#4ECDC4", // teal
        "#45B7D1", // blue
        "#96CEB4", // green
        "#FFEAA7", // yellow
        "#DDA0DD", // plum
        "#98D8C8", // mint
        "#F7DC6F", // gold
        "#BB8FCE", // purple
        "#85C1E9", // light blue
    ];

    pub fn new() -> Self {
        Self {
            letter_size: Self::DEFAULT_LETTER_SIZE,
            letter_padding: Self::DEFAULT_LETTER_PADDING,
            word_band_top: Self::DEFAULT_WORD_BAND_TOP,
            word_band_bottom: Self::DEFAULT_WORD_BAND_BOTTOM,
            scatter_attempts: Self::DEFAULT_SCATTER_ATTEMPTS,
            rejected_drop_offset: Self::DEFAULT_REJECTED_DROP_OFFSET,
            palette: Self::DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Color for the letter at `index`. Falls back to white for an empty palette.
    pub fn color_for(&self, index: usize) -> String {
        if self.palette.is_empty() {
            return "#FFFFFF".to_string();
        }
        self.palette[index % self.palette.len()].clone()
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self::new()
    }
}
