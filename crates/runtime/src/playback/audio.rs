//! Playback policy: recorded clip first, speech synthesis second, fallback
//! timing always.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use speller_content::{EncouragementLine, PhraseCatalog};
use tracing::{debug, warn};

use super::backend::{ClipId, NarrationBackend};
use super::{AudioTiming, PhraseKey, PlaybackService, PlaybackTiming, SfxKind, WordOptions};

/// Speech rates for the synthesized fallbacks.
const LETTER_RATE: f32 = 0.7;
const PHRASE_RATE: f32 = 0.8;
const GREETING_RATE: f32 = 0.82;

/// [`PlaybackService`] over a [`NarrationBackend`].
///
/// Recorded clip lengths are used when the backend knows them; otherwise the
/// cue is spoken and paced by [`AudioTiming`] minimums. Backend errors are
/// logged and swallowed. Until [`PlaybackService::unlock_audio`] succeeds
/// nothing reaches the backend, but timings are still reported so pacing holds.
pub struct AudioService<B> {
    backend: B,
    timing: AudioTiming,
    phrases: PhraseCatalog,
    unlocked: AtomicBool,
    last_encouragement: Mutex<Option<String>>,
    rng: Mutex<StdRng>,
}

impl<B: NarrationBackend> AudioService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            timing: AudioTiming::default(),
            phrases: PhraseCatalog::default(),
            unlocked: AtomicBool::new(false),
            last_encouragement: Mutex::new(None),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_timing(mut self, timing: AudioTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_phrases(mut self, phrases: PhraseCatalog) -> Self {
        self.phrases = phrases;
        self
    }

    /// Makes encouragement selection reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked.load(Ordering::Acquire)
    }

    /// Key of the encouragement line said last.
    pub fn last_encouragement(&self) -> Option<String> {
        self.last_encouragement
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Picks an encouragement line, never the same key twice in a row unless
    /// the pool has only one line.
    fn pick_encouragement(&self) -> Option<EncouragementLine> {
        let pool = &self.phrases.encouragements;
        let mut last = self
            .last_encouragement
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let candidates: Vec<&EncouragementLine> = if pool.len() > 1 {
            pool.iter()
                .filter(|line| Some(&line.key) != last.as_ref())
                .collect()
        } else {
            pool.iter().collect()
        };
        if candidates.is_empty() {
            return None;
        }

        let index = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(0..candidates.len());
        let line = candidates[index].clone();
        *last = Some(line.key.clone());
        Some(line)
    }

    /// Plays `clip` if a recording exists, returning its length.
    async fn try_clip(&self, clip: ClipId) -> Option<Duration> {
        match self.backend.play_clip(&clip).await {
            Ok(length) => length,
            Err(error) => {
                warn!(%clip, %error, "clip playback failed; falling back to speech");
                None
            }
        }
    }

    fn speak(&self, text: &str, rate: f32) {
        if let Err(error) = self.backend.speak(text, rate) {
            warn!(text, %error, "speech synthesis failed; keeping fallback timing");
        }
    }

    /// Clip, else speech: the shared shape of every narration cue.
    async fn narrate(
        &self,
        clip: Option<ClipId>,
        speech: &str,
        rate: f32,
        fallback: Duration,
        buffer: Duration,
    ) -> PlaybackTiming {
        if !self.is_unlocked() {
            debug!(speech, "audio locked; pacing without sound");
            return PlaybackTiming::new(fallback, buffer);
        }
        if let Some(clip) = clip
            && let Some(length) = self.try_clip(clip).await
        {
            return PlaybackTiming::new(length, buffer);
        }
        self.speak(speech, rate);
        PlaybackTiming::new(fallback, buffer)
    }
}

#[async_trait]
impl<B: NarrationBackend> PlaybackService for AudioService<B> {
    fn unlock_audio(&self) {
        if self.unlocked.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Err(error) = self.backend.unlock() {
            warn!(%error, "audio unlock failed");
            self.unlocked.store(false, Ordering::Release);
        }
    }

    fn stop_narration(&self) {
        self.backend.stop();
    }

    fn play_sfx(&self, kind: SfxKind) {
        if !self.is_unlocked() {
            debug!(%kind, "audio locked; sound effect skipped");
            return;
        }
        if let Err(error) = self.backend.play_effect(kind) {
            warn!(%kind, %error, "sound effect failed");
        }
    }

    async fn play_letter(&self, letter: char) -> PlaybackTiming {
        let lower: String = letter.to_lowercase().collect();
        let first = lower.chars().next().unwrap_or(letter);
        self.narrate(
            Some(ClipId::Letter(first)),
            &lower,
            LETTER_RATE,
            self.timing.min_durations.letter,
            self.timing.buffers.letter_after,
        )
        .await
    }

    async fn play_word(&self, word: &str, options: WordOptions) -> PlaybackTiming {
        if word.is_empty() {
            return PlaybackTiming::NONE;
        }
        // A recording only matches the plain word, not re-phrased text.
        let clip = options
            .override_text
            .is_none()
            .then(|| ClipId::Word(word.to_string()));
        let speech = options.override_text.as_deref().unwrap_or(word);
        self.narrate(
            clip,
            speech,
            options.rate,
            self.timing.min_durations.word,
            Duration::ZERO,
        )
        .await
    }

    async fn play_phrase(&self, key: PhraseKey) -> PlaybackTiming {
        let min = self.timing.min_durations;
        let buffers = self.timing.buffers;
        match key {
            PhraseKey::Greeting => {
                let text = self.phrases.greeting.clone();
                self.narrate(
                    Some(ClipId::Phrase("greeting".to_string())),
                    &text,
                    GREETING_RATE,
                    min.greeting,
                    buffers.greeting_after,
                )
                .await
            }
            PhraseKey::IsSpelled => {
                let text = self.phrases.is_spelled.clone();
                self.narrate(
                    Some(ClipId::Phrase("is-spelled".to_string())),
                    &text,
                    PHRASE_RATE,
                    min.phrase,
                    buffers.phrase_after,
                )
                .await
            }
            PhraseKey::Encouragement => {
                let Some(line) = self.pick_encouragement() else {
                    return PlaybackTiming::NONE;
                };
                self.narrate(
                    Some(ClipId::Phrase(format!("encouragement/{}", line.key))),
                    &line.text,
                    GREETING_RATE,
                    min.encouragement,
                    buffers.encouragement_after,
                )
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::backend::PlaybackError;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Unlock,
        Stop,
        Effect(SfxKind),
        Clip(ClipId),
        Speak(String, f32),
    }

    #[derive(Default)]
    struct FakeBackend {
        calls: Arc<Mutex<Vec<Call>>>,
        clips: HashMap<ClipId, Duration>,
        fail_clips: bool,
        fail_speech: bool,
    }

    impl FakeBackend {
        fn with_clip(mut self, clip: ClipId, millis: u64) -> Self {
            self.clips.insert(clip, Duration::from_millis(millis));
            self
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NarrationBackend for FakeBackend {
        fn unlock(&self) -> Result<(), PlaybackError> {
            self.calls.lock().unwrap().push(Call::Unlock);
            Ok(())
        }

        fn stop(&self) {
            self.calls.lock().unwrap().push(Call::Stop);
        }

        fn play_effect(&self, kind: SfxKind) -> Result<(), PlaybackError> {
            self.calls.lock().unwrap().push(Call::Effect(kind));
            Ok(())
        }

        async fn play_clip(&self, clip: &ClipId) -> Result<Option<Duration>, PlaybackError> {
            self.calls.lock().unwrap().push(Call::Clip(clip.clone()));
            if self.fail_clips {
                return Err(PlaybackError::Decode {
                    clip: clip.to_string(),
                });
            }
            Ok(self.clips.get(clip).copied())
        }

        fn speak(&self, text: &str, rate: f32) -> Result<(), PlaybackError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Speak(text.to_string(), rate));
            if self.fail_speech {
                return Err(PlaybackError::SynthesisUnavailable);
            }
            Ok(())
        }
    }

    fn unlocked(backend: FakeBackend) -> AudioService<FakeBackend> {
        let service = AudioService::new(backend).with_seed(1);
        service.unlock_audio();
        service
    }

    #[tokio::test]
    async fn recorded_letter_uses_clip_length() {
        let service = unlocked(FakeBackend::default().with_clip(ClipId::Letter('c'), 410));
        let timing = service.play_letter('C').await;
        assert_eq!(timing.duration, Duration::from_millis(410));
        assert_eq!(timing.buffer, Duration::from_millis(220));
        assert!(
            !service
                .backend()
                .calls()
                .iter()
                .any(|c| matches!(c, Call::Speak(..)))
        );
    }

    #[tokio::test]
    async fn missing_letter_clip_speaks_with_minimum() {
        let service = unlocked(FakeBackend::default());
        let timing = service.play_letter('a').await;
        assert_eq!(timing, PlaybackTiming::new(
            Duration::from_millis(350),
            Duration::from_millis(220)
        ));
        assert!(
            service
                .backend()
                .calls()
                .contains(&Call::Speak("a".to_string(), LETTER_RATE))
        );
    }

    #[tokio::test]
    async fn backend_failures_degrade_to_fallback() {
        let backend = FakeBackend {
            fail_clips: true,
            fail_speech: true,
            ..FakeBackend::default()
        };
        let service = unlocked(backend);
        let timing = service.play_phrase(PhraseKey::Greeting).await;
        assert_eq!(timing.duration, Duration::from_millis(2200));
        assert_eq!(timing.buffer, Duration::from_millis(350));
    }

    #[tokio::test]
    async fn locked_audio_paces_without_backend() {
        let service = AudioService::new(FakeBackend::default());
        let timing = service.play_phrase(PhraseKey::IsSpelled).await;
        service.play_sfx(SfxKind::Pop);
        assert_eq!(timing.duration, Duration::from_millis(900));
        assert!(service.backend().calls().is_empty());
    }

    #[test]
    fn unlock_is_idempotent() {
        let service = AudioService::new(FakeBackend::default());
        service.unlock_audio();
        service.unlock_audio();
        assert_eq!(service.backend().calls(), vec![Call::Unlock]);
    }

    #[tokio::test]
    async fn word_override_text_skips_recording() {
        let service = unlocked(FakeBackend::default().with_clip(ClipId::Word("cat".into()), 600));

        let plain = service.play_word("cat", WordOptions::default()).await;
        assert_eq!(plain.duration, Duration::from_millis(600));

        let rephrased = service
            .play_word("cat", WordOptions::with_rate(0.78).override_text("cat."))
            .await;
        assert_eq!(rephrased.duration, Duration::from_millis(500));
        assert!(
            service
                .backend()
                .calls()
                .contains(&Call::Speak("cat.".to_string(), 0.78))
        );
    }

    #[tokio::test]
    async fn empty_word_has_no_timing() {
        let service = unlocked(FakeBackend::default());
        assert_eq!(
            service.play_word("", WordOptions::default()).await,
            PlaybackTiming::NONE
        );
    }

    #[tokio::test]
    async fn encouragement_never_repeats_back_to_back() {
        let service = unlocked(FakeBackend::default());
        let mut previous = None;
        for _ in 0..50 {
            service.play_phrase(PhraseKey::Encouragement).await;
            let current = service.last_encouragement();
            assert!(current.is_some());
            assert_ne!(current, previous);
            previous = current;
        }
    }

    #[tokio::test]
    async fn single_encouragement_line_may_repeat() {
        let phrases = PhraseCatalog {
            encouragements: vec![EncouragementLine::new("only", "Yay!")],
            ..PhraseCatalog::default()
        };
        let service = AudioService::new(FakeBackend::default())
            .with_phrases(phrases)
            .with_seed(3);
        service.unlock_audio();

        for _ in 0..3 {
            let timing = service.play_phrase(PhraseKey::Encouragement).await;
            assert_eq!(timing.duration, Duration::from_millis(1400));
            assert_eq!(service.last_encouragement().as_deref(), Some("only"));
        }
    }

    #[test]
    fn stop_reaches_backend() {
        let service = AudioService::new(FakeBackend::default());
        service.stop_narration();
        assert_eq!(service.backend().calls(), vec![Call::Stop]);
    }
}
