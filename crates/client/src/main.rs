//! Spelling game demo binary.
//!
//! Plays a few words headlessly, narrating into the log.
//!
//! ```bash
//! SPELLER_ROUNDS=5 RUST_LOG=speller=debug cargo run -p speller-cli
//! ```

use anyhow::Result;
use speller_content::{PhraseCatalog, PhraseCatalogLoader, WordList, WordListLoader};
use speller_runtime::{AudioService, GameFlow, RuntimeConfig, TracingBackend};

use speller_cli::{CliConfig, autoplay, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let runtime_config = RuntimeConfig::from_env();
    let cli_config = CliConfig::from_env();

    // 2. Setup logging
    let _log_guard = logging::setup_logging(cli_config.log_dir.as_deref())?;

    tracing::info!("Starting speller");
    tracing::info!("Rounds: {}", cli_config.rounds);
    tracing::info!("Seed: {:?}", runtime_config.seed);

    // 3. Load content
    let words = match &cli_config.words_file {
        Some(path) => WordListLoader::load(path)?,
        None => WordList::default(),
    };
    let phrases = match &cli_config.phrases_file {
        Some(path) => PhraseCatalogLoader::load(path)?,
        None => PhraseCatalog::default(),
    };
    tracing::debug!("Loaded {} words", words.len());

    // 4. Build playback and flow
    let mut playback = AudioService::new(TracingBackend)
        .with_timing(runtime_config.audio)
        .with_phrases(phrases);
    if let Some(seed) = runtime_config.seed {
        playback = playback.with_seed(seed);
    }

    let flow = GameFlow::builder()
        .config(runtime_config)
        .playback(playback)
        .words(words)
        .layout(cli_config.layout)
        .build()?;

    // 5. Play
    let report = autoplay::run(&flow, cli_config.rounds).await?;

    tracing::info!(
        "Session finished: {} words, {} wrong drops",
        report.words.len(),
        report.rejected_drops
    );
    Ok(())
}
