//! Countdown state machine.
//!
//! This module owns the only mutable state of the widget: the frozen target
//! duration, the remaining time, the running flag and the derived progress.
//! It knows nothing about terminals, key presses or schedulers; ticks and
//! user intents arrive as plain method calls and every call reports whether
//! anything changed so the caller knows when to re-render.
//!
//! # Lifecycle
//!
//! ```text
//!            start()                 tick() reaches zero
//! Editable ───────────▶ Running ───────────────────────▶ (Expired) ─┐
//!    ▲                     │                                        │
//!    └──── pause() ────────┘◀──────── folds back immediately ───────┘
//! ```
//!
//! While editable, `remaining` is the pending length of the next run and can
//! be changed freely. `start()` freezes it as the target. Stopping a running
//! countdown discards the elapsed time: the remaining time snaps back to the
//! frozen target and progress drops to zero.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_ring::timer::{State, TickOutcome};
//! use std::time::Duration;
//!
//! let mut state = State::new(Duration::from_secs(2));
//! assert!(state.start());
//!
//! assert_eq!(state.tick(Duration::from_secs(1)), TickOutcome::Counted);
//! assert_eq!(state.progress(), 0.5);
//!
//! assert_eq!(state.tick(Duration::from_secs(1)), TickOutcome::Expired);
//! assert!(!state.is_running());
//! assert_eq!(state.remaining(), Duration::from_secs(2));
//! ```

use std::time::Duration;

/// Default countdown length used when nothing else is configured.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(120);

/// The externally visible phase of the state machine.
///
/// `Expired` never persists: it is reported through [`TickOutcome::Expired`]
/// and the state is already back in `Editable` when `tick` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Idle; the remaining time is the editable length of the next run.
    Editable,
    /// Counting down; the target is frozen.
    Running,
}

/// Result of feeding one tick into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown is not running; nothing changed.
    Ignored,
    /// Remaining time decreased and progress was recomputed.
    Counted,
    /// Remaining time crossed zero. The countdown has already been reset to
    /// its target and is editable again.
    Expired,
}

impl TickOutcome {
    /// Whether the tick mutated the state.
    pub fn changed(self) -> bool {
        !matches!(self, TickOutcome::Ignored)
    }
}

/// Countdown state: target, remaining time, running flag and progress.
///
/// Fields are private so the progress invariant holds after every public
/// operation: `progress == clamp((target - remaining) / target, 0, 1)` while
/// running, and `0` while idle.
///
/// # Examples
///
/// Editing is only honoured while idle:
///
/// ```rust
/// use countdown_ring::timer::State;
/// use std::time::Duration;
///
/// let mut state = State::new(Duration::ZERO);
/// assert!(state.adjust_duration(60));
/// assert_eq!(state.remaining(), Duration::from_secs(60));
///
/// state.start();
/// assert!(!state.adjust_duration(60));
/// assert_eq!(state.remaining(), Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    target: Duration,
    remaining: Duration,
    running: bool,
    progress: f64,
}

impl Default for State {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl State {
    /// Creates an idle countdown whose next run lasts `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            target: duration,
            remaining: duration,
            running: false,
            progress: 0.0,
        }
    }

    /// The length captured by the last `start()`, or the initial duration.
    pub fn target(&self) -> Duration {
        self.target
    }

    /// Time left in the current run, or the pending length while idle.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// [`target`](Self::target) in fractional seconds.
    pub fn target_secs(&self) -> f64 {
        self.target.as_secs_f64()
    }

    /// [`remaining`](Self::remaining) in fractional seconds.
    pub fn remaining_secs(&self) -> f64 {
        self.remaining.as_secs_f64()
    }

    /// Whether the countdown is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fraction of the target already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        if self.running {
            Phase::Running
        } else {
            Phase::Editable
        }
    }

    /// Starts counting down from the current remaining time.
    ///
    /// The remaining time becomes the frozen target. Returns `false` and does
    /// nothing when already running or when there is no time to count down.
    pub fn start(&mut self) -> bool {
        if self.running {
            tracing::debug!("start ignored: already running");
            return false;
        }
        if self.remaining.is_zero() {
            tracing::debug!("start ignored: duration is zero");
            return false;
        }

        self.target = self.remaining;
        self.running = true;
        self.recompute_progress();
        tracing::info!(target_secs = self.target_secs(), "countdown started");
        true
    }

    /// Stops a running countdown and discards the elapsed time.
    ///
    /// Remaining time returns to the target and progress to zero. Returns
    /// `false` when the countdown was not running.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            tracing::debug!("pause ignored: not running");
            return false;
        }

        self.reset_to_target();
        tracing::info!(target_secs = self.target_secs(), "countdown stopped");
        true
    }

    /// Starts when idle, stops when running.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Advances a running countdown by `delta`.
    ///
    /// Subtraction saturates at zero, so reaching zero exactly and
    /// overshooting it are the same expiry. Expiry fires once: the state is
    /// idle afterwards, so later ticks are [`TickOutcome::Ignored`].
    pub fn tick(&mut self, delta: Duration) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(delta);

        if self.remaining.is_zero() {
            self.reset_to_target();
            tracing::info!(target_secs = self.target_secs(), "countdown expired");
            return TickOutcome::Expired;
        }

        self.recompute_progress();
        TickOutcome::Counted
    }

    /// Replaces the pending duration while idle.
    ///
    /// The pending duration is the next target, so progress stays at zero.
    /// Returns `false` without touching anything while running, or when the
    /// value is unchanged.
    pub fn set_duration(&mut self, duration: Duration) -> bool {
        if self.running {
            tracing::debug!("edit ignored: countdown is running");
            return false;
        }
        if self.remaining == duration {
            return false;
        }

        self.remaining = duration;
        self.progress = 0.0;
        true
    }

    /// Adds `delta_secs` (possibly negative) to the pending duration.
    ///
    /// The base is the whole number of seconds shown to the user, i.e. the
    /// remaining time rounded up. Results below zero clamp to zero.
    pub fn adjust_duration(&mut self, delta_secs: i64) -> bool {
        let shown = self.remaining.as_secs_f64().ceil() as i64;
        let next = shown.saturating_add(delta_secs).max(0);
        self.set_duration(Duration::from_secs(next as u64))
    }

    fn reset_to_target(&mut self) {
        self.running = false;
        self.remaining = self.target;
        self.progress = 0.0;
    }

    fn recompute_progress(&mut self) {
        self.progress = progress_of(self.target, self.remaining);
    }
}

/// `clamp((target - remaining) / target, 0, 1)`, with a zero target mapping to 0.
pub fn progress_of(target: Duration, remaining: Duration) -> f64 {
    if target.is_zero() {
        return 0.0;
    }
    let target = target.as_secs_f64();
    let remaining = remaining.as_secs_f64();
    ((target - remaining) / target).clamp(0.0, 1.0)
}
