//! Step interpreter for narration runs.
//!
//! A [`Script`] is an ordered list of steps, each either a pause or a named
//! effect. The interpreter checks [`Sequence::is_current`] before every step
//! and again right after every effect resumes, so call sites never have to
//! remember the currency check themselves.

use std::time::Duration;

use async_trait::async_trait;

use super::Sequence;

/// One step of a script.
#[derive(Clone, Debug, PartialEq)]
pub enum Step<E> {
    /// Cancellable pause.
    Wait(Duration),
    /// Effect to perform; the runner returns how long to hold afterwards.
    Run(E),
}

/// Performs the effects of a script.
#[async_trait]
pub trait StepRunner<E: Send + 'static>: Send + Sync {
    /// Performs `effect` and returns the hold time before the next step
    /// (`Duration::ZERO` for instant effects).
    async fn run(&self, effect: E) -> Duration;
}

/// How a script run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptOutcome {
    Completed,
    /// The sequence stopped being current while step `at_step` was running
    /// or about to run.
    Superseded { at_step: usize },
}

impl ScriptOutcome {
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Ordered narration steps.
#[derive(Clone, Debug, PartialEq)]
pub struct Script<E> {
    steps: Vec<Step<E>>,
}

impl<E> Script<E> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn wait(mut self, duration: Duration) -> Self {
        self.steps.push(Step::Wait(duration));
        self
    }

    pub fn wait_ms(self, millis: u64) -> Self {
        self.wait(Duration::from_millis(millis))
    }

    pub fn run(mut self, effect: E) -> Self {
        self.steps.push(Step::Run(effect));
        self
    }

    /// Adds `effect` only when `condition` holds.
    pub fn run_if(self, condition: bool, effect: E) -> Self {
        if condition { self.run(effect) } else { self }
    }

    pub fn then(mut self, other: Script<E>) -> Self {
        self.steps.extend(other.steps);
        self
    }

    pub fn steps(&self) -> &[Step<E>] {
        &self.steps
    }
}

impl<E: Send + 'static> Script<E> {
    /// Runs every step in order while `sequence` stays current.
    pub async fn execute<R>(self, sequence: &Sequence, runner: &R) -> ScriptOutcome
    where
        R: StepRunner<E> + ?Sized,
    {
        for (at_step, step) in self.steps.into_iter().enumerate() {
            if !sequence.is_current() {
                return ScriptOutcome::Superseded { at_step };
            }
            let hold = match step {
                Step::Wait(duration) => duration,
                Step::Run(effect) => {
                    let hold = runner.run(effect).await;
                    if !sequence.is_current() {
                        return ScriptOutcome::Superseded { at_step };
                    }
                    hold
                }
            };
            if !sequence.wait(hold).await {
                return ScriptOutcome::Superseded { at_step };
            }
        }
        ScriptOutcome::Completed
    }
}

impl<E> Default for Script<E> {
    fn default() -> Self {
        Self::new()
    }
}
