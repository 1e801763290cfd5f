//! Game flow controller.
//!
//! [`GameFlow`] is the single writer of both the flow state and the puzzle
//! state. Host callbacks (tap, slots measured, letter dropped) enter here;
//! each narration entry point checks its guards, moves the phase and starts
//! its [`Sequence`] synchronously, then spawns the rest of the run as a tokio
//! task and hands back the task's [`JoinHandle`].

use std::sync::{Arc, Mutex, PoisonError};

use speller_content::WordList;
use speller_core::{
    Layout, LetterId, Placement, Point, Puzzle, PuzzlePhase, PuzzleState, SlotGeometry,
};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info};

use super::narration::{Cue, celebration_script, greeting_script, intro_script};
use super::phase::{FlowPhase, FlowState};
use crate::api::{Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{EventBus, FlowEvent};
use crate::playback::{PlaybackService, SfxKind};
use crate::sequence::{Script, ScriptOutcome, Sequence, SequenceController};

/// Result of [`GameFlow::handle_letter_drop`].
#[derive(Debug)]
pub struct DropOutcome {
    /// `None` when the letters are not in play.
    pub placement: Option<Placement>,
    /// Celebration run started by this drop.
    pub celebration: Option<JoinHandle<()>>,
}

impl DropOutcome {
    fn refused() -> Self {
        Self {
            placement: None,
            celebration: None,
        }
    }
}

pub(crate) struct FlowInner {
    config: RuntimeConfig,
    playback: Arc<dyn PlaybackService>,
    puzzle: Mutex<Puzzle>,
    puzzle_tx: watch::Sender<PuzzleState>,
    state: Arc<watch::Sender<FlowState>>,
    layout: Mutex<Layout>,
    narration: SequenceController,
    events: EventBus,
}

impl FlowInner {
    pub(crate) fn playback(&self) -> &dyn PlaybackService {
        self.playback.as_ref()
    }

    pub(crate) fn update_state(&self, f: impl FnOnce(&mut FlowState)) {
        self.state.send_modify(f);
    }

    fn snapshot(&self) -> FlowState {
        self.state.borrow().clone()
    }

    /// Mutates the puzzle and publishes the new snapshot.
    pub(crate) fn with_puzzle<T>(&self, f: impl FnOnce(&mut Puzzle) -> T) -> T {
        let mut puzzle = self.puzzle.lock().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut puzzle);
        self.puzzle_tx.send_replace(puzzle.state().clone());
        result
    }

    fn puzzle_phase(&self) -> PuzzlePhase {
        self.puzzle_tx.borrow().phase
    }

    fn layout(&self) -> Layout {
        *self.layout.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attempts a table transition. Rejections are silent.
    pub(crate) fn transition(&self, next: FlowPhase) -> bool {
        let mut from = None;
        self.state.send_if_modified(|state| {
            let previous = state.flow_phase;
            let moved = state.transition(next);
            if moved {
                from = Some(previous);
            }
            moved
        });

        match from {
            Some(from) => {
                info!(%from, to = %next, "flow phase changed");
                self.events.publish(FlowEvent::PhaseChanged { from, to: next });
                true
            }
            None => {
                debug!(current = %self.state.borrow().flow_phase, requested = %next, "flow transition rejected");
                false
            }
        }
    }

    fn start_sequence(&self, label: &str) -> Sequence {
        let sequence = self.narration.start(label);
        self.events.publish(FlowEvent::SequenceStarted {
            id: sequence.id(),
            label: label.to_string(),
        });
        sequence
    }

    /// Deals `word` into the puzzle and enters SHOWING.
    pub(crate) fn begin_word(&self, word: &str) {
        self.update_state(FlowState::reset_for_word);
        self.transition(FlowPhase::Showing);

        let layout = self.layout();
        let words_completed = self.with_puzzle(|puzzle| {
            puzzle.init_word(word, layout);
            puzzle.state().words_completed
        });

        info!(word, words_completed, "word started");
        self.events.publish(FlowEvent::WordStarted {
            word: word.to_string(),
            words_completed,
        });
    }

    pub(crate) fn advance_word(&self) {
        let word = self.with_puzzle(Puzzle::next_word);
        self.begin_word(&word);
    }
}

/// Runs its closure on drop, so flags are cleared even when the narration
/// task panics or is aborted.
struct Cleanup<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Cleanup<F> {
    fn new(cleanup: F) -> Self {
        Self(Some(cleanup))
    }
}

impl<F: FnOnce()> Drop for Cleanup<F> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.0.take() {
            cleanup();
        }
    }
}

/// Cloneable handle to the game flow.
#[derive(Clone)]
pub struct GameFlow {
    inner: Arc<FlowInner>,
}

impl GameFlow {
    pub fn builder() -> GameFlowBuilder {
        GameFlowBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }

    /// Records the container size used for the next word's scatter.
    pub fn set_layout(&self, layout: Layout) {
        *self
            .inner
            .layout
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = layout;
    }

    pub fn layout(&self) -> Layout {
        self.inner.layout()
    }

    pub fn flow_state(&self) -> FlowState {
        self.inner.snapshot()
    }

    pub fn puzzle_state(&self) -> PuzzleState {
        self.inner.puzzle_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.inner.state.subscribe()
    }

    pub fn subscribe_puzzle(&self) -> watch::Receiver<PuzzleState> {
        self.inner.puzzle_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FlowEvent> {
        self.inner.events.subscribe()
    }

    /// Label of the narration run in flight, if any.
    pub fn active_narration(&self) -> Option<String> {
        self.inner.narration.active_label()
    }

    /// Stops whatever narration is running.
    pub fn cancel_narration(&self) {
        self.inner.narration.cancel();
    }

    /// First tap. Must be called from the user-gesture handler: audio is
    /// unlocked before this returns.
    ///
    /// Only valid from LOCKED; later taps are ignored.
    pub fn handle_tap_to_start(&self) -> Option<JoinHandle<()>> {
        let inner = &self.inner;
        if inner.snapshot().flow_phase != FlowPhase::Locked {
            debug!("tap ignored; flow already started");
            return None;
        }
        if !inner.transition(FlowPhase::Greeting) {
            return None;
        }

        inner.playback.unlock_audio();
        let sequence = inner.start_sequence("greeting");
        let first_word = inner.with_puzzle(|puzzle| {
            puzzle.set_phase(PuzzlePhase::Showing);
            puzzle.peek_next_word().to_string()
        });

        let cleanup = {
            let inner = Arc::clone(inner);
            Cleanup::new(move || inner.update_state(|s| s.initial_greeting_playing = false))
        };
        Some(self.spawn_narration(sequence, greeting_script(&first_word), cleanup, |inner, outcome| {
            // Cancelled before the first word: back to the tap screen.
            if !outcome.is_completed() {
                inner.transition(FlowPhase::Locked);
            }
        }))
    }

    /// Layout has measured the current word's slots.
    ///
    /// Merges `positions` into the puzzle, hands them to
    /// `update_word_center`, and starts the intro when the word is showing.
    /// Safe to call repeatedly; an empty `positions` is ignored.
    pub fn handle_slots_ready<F>(
        &self,
        positions: &[SlotGeometry],
        update_word_center: F,
    ) -> Option<JoinHandle<()>>
    where
        F: FnOnce(&[SlotGeometry]),
    {
        if positions.is_empty() {
            return None;
        }
        let inner = &self.inner;
        inner.with_puzzle(|puzzle| puzzle.set_slot_positions(positions));
        inner.update_state(|s| s.slots_ready_for_word = true);
        update_word_center(positions);

        if inner.puzzle_phase() != PuzzlePhase::Showing
            || inner.snapshot().flow_phase != FlowPhase::Showing
        {
            return None;
        }
        let word = inner.with_puzzle(|puzzle| {
            puzzle.show_word_in_slots();
            puzzle.state().current_word.clone()
        });
        self.start_intro_sequence(&word)
    }

    /// Spells `word` once before play begins.
    ///
    /// Rejected unless the word is present, its slots are measured, no intro
    /// is running or has finished for it, the puzzle is showing, the greeting
    /// is over and the flow is in SHOWING.
    pub fn start_intro_sequence(&self, word: &str) -> Option<JoinHandle<()>> {
        let inner = &self.inner;
        let state = inner.snapshot();
        if word.is_empty()
            || !state.slots_ready_for_word
            || state.intro_running
            || state.intro_completed_word.as_deref() == Some(word)
            || inner.puzzle_phase() != PuzzlePhase::Showing
            || state.initial_greeting_playing
            || state.flow_phase != FlowPhase::Showing
        {
            debug!(word, "intro request ignored");
            return None;
        }
        if !inner.transition(FlowPhase::Intro) {
            return None;
        }

        inner.update_state(|s| s.intro_running = true);
        let sequence = inner.start_sequence("intro");
        inner.update_state(FlowState::clear_highlights);

        let cleanup = {
            let inner = Arc::clone(inner);
            Cleanup::new(move || inner.update_state(|s| s.intro_running = false))
        };
        let script = intro_script(word, &inner.config.pacing);
        Some(self.spawn_narration(sequence, script, cleanup, |inner, outcome| {
            if outcome.is_completed() || inner.snapshot().flow_phase != FlowPhase::Intro {
                return;
            }
            if inner.puzzle_phase() == PuzzlePhase::Playing {
                // Letters are already scattered; let play begin.
                inner.transition(FlowPhase::Playing);
            } else {
                // Back to SHOWING with the word unmarked so the intro can replay.
                inner.update_state(|s| s.intro_completed_word = None);
                inner.transition(FlowPhase::Showing);
            }
        }))
    }

    /// Celebrates a completed `word`, then deals the next one.
    ///
    /// Rejected when the word is empty, a celebration is running, this word
    /// was already celebrated, or the flow is not in PLAYING.
    pub fn trigger_celebration_sequence(&self, word: &str) -> Option<JoinHandle<()>> {
        let inner = &self.inner;
        let state = inner.snapshot();
        if word.is_empty()
            || state.celebrating
            || state.last_celebrated_word.as_deref() == Some(word)
            || state.flow_phase != FlowPhase::Playing
        {
            debug!(word, "celebration request ignored");
            return None;
        }
        if !inner.transition(FlowPhase::Celebrating) {
            return None;
        }

        inner.update_state(|s| {
            s.celebrating = true;
            s.last_celebrated_word = Some(word.to_string());
        });
        let sequence = inner.start_sequence("celebration");

        let (letters, words_completed) = {
            let puzzle = inner.puzzle.lock().unwrap_or_else(PoisonError::into_inner);
            (
                puzzle.placed_letter_screen_order(),
                puzzle.state().words_completed,
            )
        };
        let pacing = &inner.config.pacing;
        let script = celebration_script(word, &letters, pacing.encourages(words_completed), pacing);

        let cleanup = {
            let inner = Arc::clone(inner);
            Cleanup::new(move || inner.update_state(|s| s.celebrating = false))
        };
        Some(self.spawn_narration(sequence, script, cleanup, |inner, outcome| {
            // The word is done either way; skip straight to the next one.
            if !outcome.is_completed() && inner.snapshot().flow_phase == FlowPhase::Celebrating {
                inner.advance_word();
            }
        }))
    }

    /// Drops a letter on a slot while the letters are in play.
    ///
    /// Plays a pop for a correct drop and a thud for a rejected one; the drop
    /// that completes the word triggers the celebration.
    pub fn handle_letter_drop(&self, letter: LetterId, slot: usize) -> DropOutcome {
        let inner = &self.inner;
        if inner.puzzle_phase() != PuzzlePhase::Playing {
            debug!(%letter, slot, "drop ignored; letters not in play");
            return DropOutcome::refused();
        }

        let (placement, word) = inner.with_puzzle(|puzzle| {
            let placement = puzzle.place_letter(letter, slot);
            (placement, puzzle.state().current_word.clone())
        });

        let mut celebration = None;
        match placement {
            Placement::Placed { completed } => {
                inner.playback.play_sfx(SfxKind::Pop);
                inner.events.publish(FlowEvent::LetterPlaced {
                    letter,
                    slot,
                    completed,
                });
                if completed {
                    celebration = self.trigger_celebration_sequence(&word);
                }
            }
            Placement::Rejected { .. } => {
                inner.playback.play_sfx(SfxKind::Thud);
                inner.events.publish(FlowEvent::LetterRejected { letter, slot });
            }
            Placement::Ignored(reason) => {
                debug!(%letter, slot, %reason, "drop ignored");
            }
        }

        DropOutcome {
            placement: Some(placement),
            celebration,
        }
    }

    /// Drag update. Returns false for placed or unknown letters.
    pub fn move_letter(&self, letter: LetterId, position: Point) -> bool {
        self.inner
            .with_puzzle(|puzzle| puzzle.move_letter(letter, position))
    }

    fn spawn_narration<C>(
        &self,
        sequence: Sequence,
        script: Script<Cue>,
        cleanup: Cleanup<C>,
        finish: impl FnOnce(&FlowInner, ScriptOutcome) + Send + 'static,
    ) -> JoinHandle<()>
    where
        C: FnOnce() + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let span = tracing::info_span!("narration", label = sequence.label(), id = sequence.id());
        tokio::spawn(
            async move {
                let outcome = script.execute(&sequence, inner.as_ref()).await;
                if outcome.is_completed() {
                    inner.narration.finish(&sequence);
                }
                debug!(?outcome, "narration finished");
                drop(cleanup);
                finish(&inner, outcome);
            }
            .instrument(span),
        )
    }
}

impl std::fmt::Debug for GameFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameFlow")
            .field("state", &*self.inner.state.borrow())
            .field("narration", &self.inner.narration)
            .finish()
    }
}

/// Builder for [`GameFlow`].
pub struct GameFlowBuilder {
    config: RuntimeConfig,
    playback: Option<Arc<dyn PlaybackService>>,
    words: Option<Vec<String>>,
    layout: Layout,
}

impl GameFlowBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            playback: None,
            words: None,
            layout: Layout::default(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required playback service
    pub fn playback(self, playback: impl PlaybackService + 'static) -> Self {
        self.shared_playback(Arc::new(playback))
    }

    /// Set a playback service the caller keeps a handle to
    pub fn shared_playback(mut self, playback: Arc<dyn PlaybackService>) -> Self {
        self.playback = Some(playback);
        self
    }

    /// Words to deal from (default: the built-in list)
    pub fn words(mut self, words: WordList) -> Self {
        self.words = Some(words.into_words());
        self
    }

    /// Initial container layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn build(self) -> Result<GameFlow> {
        let playback = self.playback.ok_or(RuntimeError::MissingPlayback)?;
        let words = self
            .words
            .unwrap_or_else(|| WordList::default().into_words());
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let puzzle = Puzzle::new(words, seed, self.config.puzzle.clone())?;

        let (puzzle_tx, _) = watch::channel(puzzle.state().clone());
        let (state_tx, _) = watch::channel(FlowState::default());
        let state = Arc::new(state_tx);
        let events = EventBus::with_capacity(self.config.event_buffer_size);

        let narration = {
            let playback = Arc::clone(&playback);
            let state = Arc::clone(&state);
            let events = events.clone();
            SequenceController::with_cancel_hook(move |label| {
                playback.stop_narration();
                state.send_modify(FlowState::clear_highlights);
                events.publish(FlowEvent::SequenceCancelled {
                    label: label.to_string(),
                });
            })
        };

        debug!(seed, "game flow built");
        Ok(GameFlow {
            inner: Arc::new(FlowInner {
                config: self.config,
                playback,
                puzzle: Mutex::new(puzzle),
                puzzle_tx,
                state,
                layout: Mutex::new(self.layout),
                narration,
                events,
            }),
        })
    }
}
