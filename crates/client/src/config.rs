//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use speller_core::Layout;

/// Configuration of the headless demo session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Words to spell before exiting.
    pub rounds: u32,
    pub words_file: Option<PathBuf>,
    pub phrases_file: Option<PathBuf>,
    /// Log directory (default: platform cache directory).
    pub log_dir: Option<PathBuf>,
    /// Simulated screen the puzzle is laid out on.
    pub layout: Layout,
}

impl CliConfig {
    pub const DEFAULT_ROUNDS: u32 = 3;
    pub const DEFAULT_WIDTH: f32 = 1024.0;
    pub const DEFAULT_HEIGHT: f32 = 768.0;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SPELLER_ROUNDS` - Words to play (default: 3)
    /// - `SPELLER_WORDS_FILE` - RON or TOML word list (default: built-in list)
    /// - `SPELLER_PHRASES_FILE` - RON phrase catalog (default: built-in phrases)
    /// - `SPELLER_LOG_DIR` - Log directory (default: platform-specific)
    /// - `SPELLER_WIDTH` / `SPELLER_HEIGHT` - Screen size in pixels (default: 1024x768)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(rounds) = read_env::<u32>("SPELLER_ROUNDS") {
            config.rounds = rounds.max(1);
        }

        config.words_file = env::var("SPELLER_WORDS_FILE").ok().map(PathBuf::from);
        config.phrases_file = env::var("SPELLER_PHRASES_FILE").ok().map(PathBuf::from);
        config.log_dir = env::var("SPELLER_LOG_DIR").ok().map(PathBuf::from);

        let width = read_env::<f32>("SPELLER_WIDTH")
            .filter(|w| *w > 0.0)
            .unwrap_or(Self::DEFAULT_WIDTH);
        let height = read_env::<f32>("SPELLER_HEIGHT")
            .filter(|h| *h > 0.0)
            .unwrap_or(Self::DEFAULT_HEIGHT);
        config.layout = Layout::new(width, height, width >= height);

        config
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rounds: Self::DEFAULT_ROUNDS,
            words_file: None,
            phrases_file: None,
            log_dir: None,
            layout: Layout::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT, true),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
