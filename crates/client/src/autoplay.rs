//! Scripted child that plays a whole session through the public flow API.
//!
//! Stands in for the drag-and-drop UI: it taps start, reports measured slots
//! for every new word, makes one wrong drop, then spells the word correctly
//! and waits out the celebration.

use anyhow::{Context, Result, bail};
use speller_core::{LetterId, PuzzleState, SlotGeometry};
use speller_runtime::{FlowPhase, FlowState, GameFlow};
use tokio::sync::watch;
use tracing::{debug, info};

/// What a session did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Words spelled, in order.
    pub words: Vec<String>,
    pub rejected_drops: u32,
}

/// Plays `rounds` words.
pub async fn run(flow: &GameFlow, rounds: u32) -> Result<SessionReport> {
    let mut flow_rx = flow.subscribe();
    let mut report = SessionReport::default();

    info!("👆 tap to start");
    let greeting = flow
        .handle_tap_to_start()
        .context("flow has already been started")?;
    greeting.await?;

    for round in 1..=rounds {
        let word = flow.puzzle_state().current_word;
        info!(round, word = %word, "new word on screen");

        let slots = measure_slots(flow);
        if let Some(intro) = flow.handle_slots_ready(&slots, |positions| {
            debug!(slots = positions.len(), "word centered over slots");
        }) {
            intro.await?;
        }
        wait_for_phase(&mut flow_rx, FlowPhase::Playing).await?;

        let puzzle = flow.puzzle_state();
        if let Some((letter, slot)) = wrong_drop(&puzzle) {
            let outcome = flow.handle_letter_drop(letter, slot);
            debug!(%letter, slot, placement = ?outcome.placement, "wrong drop");
            report.rejected_drops += 1;
        }

        let mut celebration = None;
        for letter in &puzzle.letters {
            let outcome = flow.handle_letter_drop(letter.id, letter.correct_slot_index);
            celebration = outcome.celebration.or(celebration);
        }
        let Some(celebration) = celebration else {
            bail!("spelling {word:?} did not start a celebration");
        };
        celebration.await?;

        info!(round, word = %word, "🎉 word spelled");
        report.words.push(word);
    }

    Ok(report)
}

/// Slot positions a layout engine would measure for the current word.
fn measure_slots(flow: &GameFlow) -> Vec<SlotGeometry> {
    let count = flow.puzzle_state().slots.len();
    SlotGeometry::row(count, &flow.layout(), &flow.config().puzzle)
}

/// A letter paired with a slot that will reject it, if the word has one.
fn wrong_drop(puzzle: &PuzzleState) -> Option<(LetterId, usize)> {
    puzzle.slots.iter().find_map(|slot| {
        puzzle
            .letters
            .iter()
            .find(|letter| !slot.accepts(letter.char))
            .map(|letter| (letter.id, slot.index))
    })
}

async fn wait_for_phase(rx: &mut watch::Receiver<FlowState>, phase: FlowPhase) -> Result<()> {
    rx.wait_for(|state| state.flow_phase == phase)
        .await
        .with_context(|| format!("flow closed before reaching {phase}"))?;
    Ok(())
}
