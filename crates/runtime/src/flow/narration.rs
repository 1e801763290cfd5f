//! Narration cues and the scripts built from them.
//!
//! Every narration run is a [`Script`] of [`Cue`]s. The flow controller
//! implements [`StepRunner`] for cues, so state mutations and playback calls
//! only ever happen from inside the interpreter, after its currency check.

use std::time::Duration;

use async_trait::async_trait;
use speller_core::NarratedLetter;

use super::controller::FlowInner;
use crate::config::FlowPacing;
use crate::playback::{PhraseKey, SfxKind, WordOptions};
use crate::sequence::{Script, StepRunner};

/// One effect of a narration script.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Cue {
    HighlightSlot(usize),
    ClearSlot,
    HighlightWord(bool),
    Letter(char),
    Word { word: String, options: WordOptions },
    Phrase(PhraseKey),
    Sfx(SfxKind),
    /// Greeting phrase; marks the greeting as playing once it has started.
    Greeting,
    GreetingFinished,
    /// Resets per-word flags, enters SHOWING and deals `word` into the puzzle.
    BeginWord(String),
    MarkIntroComplete(String),
    ClearHighlights,
    ScatterLetters,
    EnterPlaying,
    EndCelebration,
    /// Counts the finished word and begins the next one.
    AdvanceWord,
}

#[async_trait]
impl StepRunner<Cue> for FlowInner {
    async fn run(&self, cue: Cue) -> Duration {
        match cue {
            Cue::HighlightSlot(index) => {
                self.update_state(|s| s.active_narration_slot = Some(index));
                Duration::ZERO
            }
            Cue::ClearSlot => {
                self.update_state(|s| s.active_narration_slot = None);
                Duration::ZERO
            }
            Cue::HighlightWord(active) => {
                self.update_state(|s| s.word_highlight_active = active);
                Duration::ZERO
            }
            Cue::Letter(letter) => self.playback().play_letter(letter).await.total(),
            Cue::Word { word, options } => self.playback().play_word(&word, options).await.total(),
            Cue::Phrase(key) => self.playback().play_phrase(key).await.total(),
            Cue::Sfx(kind) => {
                self.playback().play_sfx(kind);
                Duration::ZERO
            }
            Cue::Greeting => {
                let timing = self.playback().play_phrase(PhraseKey::Greeting).await;
                self.update_state(|s| s.initial_greeting_playing = true);
                timing.total()
            }
            Cue::GreetingFinished => {
                self.update_state(|s| s.initial_greeting_playing = false);
                Duration::ZERO
            }
            Cue::BeginWord(word) => {
                self.begin_word(&word);
                Duration::ZERO
            }
            Cue::MarkIntroComplete(word) => {
                self.update_state(|s| s.intro_completed_word = Some(word));
                Duration::ZERO
            }
            Cue::ClearHighlights => {
                self.update_state(|s| s.clear_highlights());
                Duration::ZERO
            }
            Cue::ScatterLetters => {
                self.with_puzzle(|puzzle| puzzle.scatter_letters());
                Duration::ZERO
            }
            Cue::EnterPlaying => {
                self.transition(super::FlowPhase::Playing);
                self.update_state(|s| s.intro_running = false);
                Duration::ZERO
            }
            Cue::EndCelebration => {
                self.update_state(|s| s.celebrating = false);
                Duration::ZERO
            }
            Cue::AdvanceWord => {
                self.advance_word();
                Duration::ZERO
            }
        }
    }
}

/// Greeting run: say hello, then deal the first word.
pub(crate) fn greeting_script(first_word: &str) -> Script<Cue> {
    Script::new()
        .run(Cue::Greeting)
        .run(Cue::GreetingFinished)
        .run(Cue::BeginWord(first_word.to_string()))
}

/// Names `word`, then each letter with its slot highlighted, then the word
/// again with `closing` options.
///
/// `announce` adds the leading "<word> ... is spelled".
fn walkthrough(
    word: &str,
    letters: &[NarratedLetter],
    announce: bool,
    closing: WordOptions,
    pacing: &FlowPacing,
) -> Script<Cue> {
    let mut script = Script::new();
    if announce {
        script = script
            .run(Cue::HighlightWord(true))
            .run(Cue::Word {
                word: word.to_string(),
                options: WordOptions::with_rate(pacing.word_rate),
            })
            .run(Cue::HighlightWord(false))
            .wait(pacing.highlight_gap)
            .run(Cue::Phrase(PhraseKey::IsSpelled));
    }

    for letter in letters {
        script = script
            .run(Cue::HighlightSlot(letter.slot_index))
            .run(Cue::Letter(letter.char))
            .run(Cue::ClearSlot);
    }

    script
        .run(Cue::HighlightWord(true))
        .run(Cue::Word {
            word: word.to_string(),
            options: closing,
        })
        .run(Cue::HighlightWord(false))
        .wait(pacing.highlight_gap)
}

/// Intro run: spell the word in its natural order, then scatter and play.
pub(crate) fn intro_script(word: &str, pacing: &FlowPacing) -> Script<Cue> {
    let letters = speller_core::natural_order(word);
    let closing = WordOptions::with_rate(pacing.intro_closing_rate).override_text(format!("{word}."));

    walkthrough(word, &letters, true, closing, pacing)
        .run(Cue::MarkIntroComplete(word.to_string()))
        .wait(pacing.intro_settle)
        .run(Cue::ClearHighlights)
        .run(Cue::ScatterLetters)
        .run(Cue::EnterPlaying)
}

/// Celebration run: fanfare, optional encouragement, the letters in screen
/// order, then the next word.
pub(crate) fn celebration_script(
    word: &str,
    letters: &[NarratedLetter],
    encourage: bool,
    pacing: &FlowPacing,
) -> Script<Cue> {
    let closing = WordOptions::with_rate(pacing.word_rate);

    Script::new()
        .wait(pacing.celebration_lead_in)
        .run(Cue::Sfx(SfxKind::Celebration))
        .wait(pacing.celebration_after_sfx)
        .run_if(encourage, Cue::Phrase(PhraseKey::Encouragement))
        .then(walkthrough(word, letters, false, closing, pacing))
        .wait(pacing.celebration_tail)
        .run(Cue::EndCelebration)
        .run(Cue::AdvanceWord)
}
