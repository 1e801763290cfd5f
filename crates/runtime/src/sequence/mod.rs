//! Cancellable narration runs.
//!
//! A [`SequenceController`] keeps at most one [`Sequence`] current. Starting a
//! new run cancels the previous one first, fires the controller's `on_cancel`
//! hook for it, and only then makes the new id current. Every continuation
//! that resumes after an `.await` must check [`Sequence::is_current`] before
//! touching shared state; [`Script`] does that check for you between steps.

mod script;

pub use script::{Script, ScriptOutcome, Step, StepRunner};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Callback fired synchronously, once, for every sequence that is cancelled.
pub type CancelHook = Box<dyn Fn(&str) + Send + Sync>;

/// Id value meaning "no sequence is active". Real ids start at 1.
const NO_SEQUENCE: u64 = 0;

struct ActiveSequence {
    id: u64,
    label: Arc<str>,
    token: CancellationToken,
}

#[derive(Default)]
struct ControllerState {
    last_id: u64,
    active: Option<ActiveSequence>,
}

/// Guarantees a single active narration run.
pub struct SequenceController {
    state: Mutex<ControllerState>,
    active_id: Arc<AtomicU64>,
    on_cancel: Option<CancelHook>,
}

impl SequenceController {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ControllerState::default()),
            active_id: Arc::new(AtomicU64::new(NO_SEQUENCE)),
            on_cancel: None,
        }
    }

    /// Controller whose cancellations run `on_cancel(label)`.
    ///
    /// The hook runs while the controller is mid-update and must not call
    /// back into it.
    pub fn with_cancel_hook(on_cancel: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            on_cancel: Some(Box::new(on_cancel)),
            ..Self::new()
        }
    }

    /// Cancels the current run (if any) and starts a new one.
    pub fn start(&self, label: &str) -> Sequence {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = state.active.take() {
            self.retire(previous);
        }

        state.last_id += 1;
        let id = state.last_id;
        let label: Arc<str> = Arc::from(label);
        let token = CancellationToken::new();
        state.active = Some(ActiveSequence {
            id,
            label: Arc::clone(&label),
            token: token.clone(),
        });
        self.active_id.store(id, Ordering::Release);
        tracing::debug!(id, label = %label, "narration sequence started");

        Sequence {
            id,
            label,
            token,
            active_id: Arc::clone(&self.active_id),
        }
    }

    /// Cancels the current run. No-op when nothing is active.
    pub fn cancel(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = state.active.take() {
            self.retire(previous);
        }
    }

    /// Retires `sequence` after it ran to completion, without the cancel hook.
    /// No-op when a newer run already replaced it.
    pub fn finish(&self, sequence: &Sequence) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.active.as_ref().is_some_and(|active| active.id == sequence.id) {
            state.active = None;
            self.active_id.store(NO_SEQUENCE, Ordering::Release);
            tracing::debug!(id = sequence.id, label = %sequence.label, "narration sequence finished");
        }
    }

    /// Label of the current run, if any.
    pub fn active_label(&self) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.active.as_ref().map(|active| active.label.to_string())
    }

    fn retire(&self, previous: ActiveSequence) {
        self.active_id.store(NO_SEQUENCE, Ordering::Release);
        previous.token.cancel();
        tracing::debug!(id = previous.id, label = %previous.label, "narration sequence cancelled");
        if let Some(on_cancel) = &self.on_cancel {
            on_cancel(&previous.label);
        }
    }
}

impl Default for SequenceController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SequenceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceController")
            .field("active_id", &self.active_id.load(Ordering::Acquire))
            .field("has_cancel_hook", &self.on_cancel.is_some())
            .finish()
    }
}

/// Handle to one narration run.
#[derive(Clone, Debug)]
pub struct Sequence {
    id: u64,
    label: Arc<str>,
    token: CancellationToken,
    active_id: Arc<AtomicU64>,
}

impl Sequence {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Cancellation signal for this run.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// True while this run is the controller's active one and not cancelled.
    pub fn is_current(&self) -> bool {
        self.active_id.load(Ordering::Acquire) == self.id && !self.token.is_cancelled()
    }

    /// Waits `duration` or until cancelled, then reports currency.
    pub async fn wait(&self, duration: Duration) -> bool {
        wait(duration, &self.token).await;
        self.is_current()
    }
}

/// Sleeps for `duration`, returning early when `token` is cancelled.
///
/// Zero durations return without yielding.
pub async fn wait(duration: Duration, token: &CancellationToken) {
    if duration.is_zero() {
        return;
    }
    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        _ = token.cancelled() => {}
    }
}
