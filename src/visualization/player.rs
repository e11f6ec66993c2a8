use std::time::Duration;

use crate::contraction::{Trace, TraceStep};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// No trace loaded
    Idle,
    /// Waiting for the user on `step`
    Paused(usize),
    /// On `step`, advancing by itself once `deadline` passes
    Playing { step: usize, deadline: Duration },
}

/// Steps through a finished [`Trace`] one snapshot at a time.
///
/// Selection steps reached going forward advance on their own after `delay`, so the highlighted
/// edge is visible briefly before the merge. With autoplay every forward step does. Going back
/// or jumping holds on the reached step. Entering a step always replaces the pending timer.
#[derive(Clone, Debug)]
pub struct TracePlayer {
    trace: Option<Trace>,
    state: PlayerState,
    delay: Duration,
    autoplay: bool,
}

impl TracePlayer {
    pub fn new(delay: Duration) -> Self {
        Self {
            trace: None,
            state: PlayerState::Idle,
            delay,
            autoplay: false,
        }
    }

    pub fn load(&mut self, trace: Trace, now: Duration) {
        self.trace = Some(trace);
        self.enter(0, now);
    }

    pub fn clear(&mut self) {
        self.trace = None;
        self.state = PlayerState::Idle;
    }

    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, autoplay: bool, now: Duration) {
        self.autoplay = autoplay;
        if let Some(step) = self.step_index() {
            self.enter(step, now);
        }
    }

    pub fn step_index(&self) -> Option<usize> {
        match self.state {
            PlayerState::Idle => None,
            PlayerState::Paused(step) | PlayerState::Playing { step, .. } => Some(step),
        }
    }

    pub fn current_step(&self) -> Option<&TraceStep> {
        let step = self.step_index()?;
        self.trace.as_ref().map(|trace| trace.current_step(step))
    }

    pub fn is_at_end(&self) -> bool {
        match (&self.trace, self.step_index()) {
            (Some(trace), Some(step)) => step >= trace.last_index(),
            _ => true,
        }
    }

    /// Deadline of the armed timer, if any
    pub fn deadline(&self) -> Option<Duration> {
        match self.state {
            PlayerState::Playing { deadline, .. } => Some(deadline),
            _ => None,
        }
    }

    /// Returns false when already on the last step
    pub fn next(&mut self, now: Duration) -> bool {
        match self.step_index() {
            Some(step) if !self.is_at_end() => {
                self.enter(step + 1, now);
                true
            }
            _ => false,
        }
    }

    pub fn previous(&mut self) -> bool {
        match self.step_index() {
            Some(step) if step > 0 => {
                self.hold(step - 1);
                true
            }
            _ => false,
        }
    }

    /// Jumps to `index`, clamped to the last step, and holds there
    pub fn seek(&mut self, index: usize) -> bool {
        let Some(last) = self.trace.as_ref().map(Trace::last_index) else {
            return false;
        };
        let target = index.min(last);
        if self.step_index() == Some(target) {
            return false;
        }
        self.hold(target);
        true
    }

    /// Advances one step if the armed timer has expired
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.state {
            PlayerState::Playing { step, deadline } if now >= deadline => {
                self.enter(step + 1, now);
                true
            }
            _ => false,
        }
    }

    fn hold(&mut self, step: usize) {
        self.state = match &self.trace {
            Some(trace) => PlayerState::Paused(step.min(trace.last_index())),
            None => PlayerState::Idle,
        };
    }

    fn enter(&mut self, step: usize, now: Duration) {
        let Some(trace) = &self.trace else {
            self.state = PlayerState::Idle;
            return;
        };
        let step = step.min(trace.last_index());
        let timed = trace.is_selection_step(step) || (self.autoplay && step < trace.last_index());

        self.state = if timed {
            PlayerState::Playing {
                step,
                deadline: now + self.delay,
            }
        } else {
            PlayerState::Paused(step)
        };
    }
}
