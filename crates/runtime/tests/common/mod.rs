//! Shared fixtures for flow integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use speller_content::WordList;
use speller_core::{Layout, SlotGeometry};
use speller_runtime::{
    GameFlow, PhraseKey, PlaybackService, PlaybackTiming, RuntimeConfig, SfxKind, WordOptions,
};
use tokio::task::JoinHandle;

pub const LETTER: PlaybackTiming =
    PlaybackTiming::new(Duration::from_millis(100), Duration::from_millis(50));
pub const WORD: PlaybackTiming = PlaybackTiming::new(Duration::from_millis(200), Duration::ZERO);
pub const PHRASE: PlaybackTiming =
    PlaybackTiming::new(Duration::from_millis(300), Duration::from_millis(50));

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Unlock,
    Stop,
    Sfx(SfxKind),
    Letter(char),
    Word(String, WordOptions),
    Phrase(PhraseKey),
}

/// Playback double with fixed timings that records every call.
#[derive(Default)]
pub struct RecordingPlayback {
    calls: Mutex<Vec<Call>>,
}

impl RecordingPlayback {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn letters(&self) -> Vec<char> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Letter(ch) => Some(ch),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PlaybackService for RecordingPlayback {
    fn unlock_audio(&self) {
        self.record(Call::Unlock);
    }

    fn stop_narration(&self) {
        self.record(Call::Stop);
    }

    fn play_sfx(&self, kind: SfxKind) {
        self.record(Call::Sfx(kind));
    }

    async fn play_letter(&self, letter: char) -> PlaybackTiming {
        self.record(Call::Letter(letter));
        LETTER
    }

    async fn play_word(&self, word: &str, options: WordOptions) -> PlaybackTiming {
        self.record(Call::Word(word.to_string(), options));
        WORD
    }

    async fn play_phrase(&self, key: PhraseKey) -> PlaybackTiming {
        self.record(Call::Phrase(key));
        PHRASE
    }
}

pub const LAYOUT: Layout = Layout::new(800.0, 600.0, true);

/// Flow over `words` with a recording playback double.
pub fn flow_with(words: &[&str]) -> (GameFlow, Arc<RecordingPlayback>) {
    let playback = Arc::new(RecordingPlayback::default());
    let config = RuntimeConfig {
        seed: Some(42),
        ..RuntimeConfig::default()
    };
    let flow = GameFlow::builder()
        .config(config)
        .shared_playback(playback.clone())
        .words(WordList::new(words.iter().copied()).expect("non-empty word list"))
        .layout(LAYOUT)
        .build()
        .expect("flow builds");
    (flow, playback)
}

/// Taps start and waits for the first word to be dealt.
pub async fn start_game(flow: &GameFlow) -> String {
    let greeting = flow
        .handle_tap_to_start()
        .expect("first tap starts the greeting");
    greeting.await.expect("greeting task");
    flow.puzzle_state().current_word
}

pub fn measure_slots(flow: &GameFlow) -> Vec<SlotGeometry> {
    let count = flow.puzzle_state().slots.len();
    SlotGeometry::row(count, &flow.layout(), &flow.config().puzzle)
}

/// Reports measured slots and waits for the intro to finish.
pub async fn run_intro(flow: &GameFlow) {
    let intro = flow
        .handle_slots_ready(&measure_slots(flow), |_| {})
        .expect("slots ready starts the intro");
    intro.await.expect("intro task");
}

/// Drops every letter into its own slot; returns the celebration run.
pub fn solve_current_word(flow: &GameFlow) -> JoinHandle<()> {
    let letters = flow.puzzle_state().letters;
    let mut celebration = None;
    for letter in letters {
        let outcome = flow.handle_letter_drop(letter.id, letter.correct_slot_index);
        assert!(outcome.placement.is_some_and(|p| p.is_placed()));
        celebration = outcome.celebration.or(celebration);
    }
    celebration.expect("last drop starts the celebration")
}
