//! Sequence runner
//!
//! Plays an ordered list of steps one at a time with a speed-controlled delay
//! between them. The runner owns no clock: callers pass the current
//! [`Instant`] to [`SequenceRunner::start`], [`SequenceRunner::tick`] and
//! [`SequenceRunner::resume`], which keeps the timing deterministic in tests.
//!
//! At most one pending deadline exists at any moment. Cancelling clears it
//! together with the queued steps, so a cancelled batch can never run a
//! leftover step after a new batch starts.
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --resume--> Running
//!                    |                                     |
//!                    +-- last step run --> Completed --delay--> Idle
//! ```

use crate::config::{clamp_speed, delay_for_speed, DEFAULT_SPEED};
use std::fmt;
use std::time::{Duration, Instant};

/// A single step, applied to the caller-owned context
pub type Step<C, E> = Box<dyn FnMut(&mut C) -> Result<(), E>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running,
    Paused,
    /// Every step has run; the completion message is pending
    Completed,
}

impl RunnerState {
    pub fn as_str(self) -> &'static str {
        match self {
            RunnerState::Idle => "idle",
            RunnerState::Running => "playing",
            RunnerState::Paused => "paused",
            RunnerState::Completed => "finishing",
        }
    }
}

/// What a call into the runner did
#[derive(Debug, PartialEq)]
pub enum Tick<E> {
    /// No sequence is active
    Idle,
    /// A sequence is active but nothing was due
    Waiting,
    /// Step `index` ran
    Stepped { index: usize },
    /// The sequence finished; carries the message queued with the batch
    Completed { message: Option<String> },
    /// Step `index` failed and the sequence was cancelled
    Aborted { index: usize, error: E },
}

pub struct SequenceRunner<C, E> {
    steps: Vec<Step<C, E>>,
    cursor: usize,
    state: RunnerState,
    deadline: Option<Instant>,
    speed: u32,
    completion: Option<String>,
}

impl<C, E> fmt::Debug for SequenceRunner<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceRunner")
            .field("steps", &self.steps.len())
            .field("cursor", &self.cursor)
            .field("state", &self.state)
            .field("deadline", &self.deadline)
            .field("speed", &self.speed)
            .finish()
    }
}

impl<C, E> Default for SequenceRunner<C, E> {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl<C, E> SequenceRunner<C, E> {
    pub fn new(speed: u32) -> Self {
        SequenceRunner {
            steps: Vec::new(),
            cursor: 0,
            state: RunnerState::Idle,
            deadline: None,
            speed: clamp_speed(speed),
            completion: None,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Number of steps already run
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.state != RunnerState::Idle
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Set the speed percentage, clamped to the slider range
    ///
    /// Only later steps see the new delay; an already scheduled deadline keeps
    /// its time.
    pub fn set_speed(&mut self, speed: u32) -> u32 {
        self.speed = clamp_speed(speed);
        self.speed
    }

    pub fn delay(&self) -> Duration {
        delay_for_speed(self.speed)
    }

    /// When the next step or completion is due
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancel whatever is queued and run a new batch
    ///
    /// The first step runs immediately; each later step runs one delay after
    /// the previous one. `completion` is handed back through
    /// [`Tick::Completed`] one delay after the last step.
    pub fn start(
        &mut self,
        steps: Vec<Step<C, E>>,
        completion: Option<String>,
        ctx: &mut C,
        now: Instant,
    ) -> Tick<E> {
        self.cancel();
        if steps.is_empty() {
            return Tick::Idle;
        }
        self.steps = steps;
        self.completion = completion;
        self.state = RunnerState::Running;
        self.advance(ctx, now)
    }

    /// Run whatever is due at `now`
    pub fn tick(&mut self, ctx: &mut C, now: Instant) -> Tick<E> {
        match self.state {
            RunnerState::Idle => Tick::Idle,
            RunnerState::Paused => Tick::Waiting,
            RunnerState::Running | RunnerState::Completed => {
                let due = self.deadline.map_or(true, |at| at <= now);
                if !due {
                    return Tick::Waiting;
                }
                self.deadline = None;
                if self.state == RunnerState::Completed {
                    let message = self.completion.take();
                    self.cancel();
                    Tick::Completed { message }
                } else {
                    self.advance(ctx, now)
                }
            }
        }
    }

    /// Stop the timer, keeping the cursor; `false` when nothing is running
    pub fn pause(&mut self) -> bool {
        if self.state != RunnerState::Running {
            return false;
        }
        self.deadline = None;
        self.state = RunnerState::Paused;
        true
    }

    /// Continue a paused sequence by running the next step immediately
    pub fn resume(&mut self, ctx: &mut C, now: Instant) -> Option<Tick<E>> {
        if self.state != RunnerState::Paused {
            return None;
        }
        self.state = RunnerState::Running;
        Some(self.advance(ctx, now))
    }

    /// Drop the queued steps and pending deadline
    pub fn cancel(&mut self) {
        self.steps.clear();
        self.cursor = 0;
        self.state = RunnerState::Idle;
        self.deadline = None;
        self.completion = None;
    }

    fn advance(&mut self, ctx: &mut C, now: Instant) -> Tick<E> {
        let index = self.cursor;
        let Some(step) = self.steps.get_mut(index) else {
            // Nothing left to run; finish on the next due tick
            self.state = RunnerState::Completed;
            self.deadline = Some(now + self.delay());
            return Tick::Waiting;
        };

        if let Err(error) = step(ctx) {
            self.cancel();
            return Tick::Aborted { index, error };
        }

        self.cursor += 1;
        if self.cursor >= self.steps.len() {
            self.state = RunnerState::Completed;
        }
        self.deadline = Some(now + self.delay());
        Tick::Stepped { index }
    }
}
