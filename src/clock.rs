//! Fixed-interval clock for driving the countdown.
//!
//! The clock is a self re-arming bubbletea command: every accepted
//! [`TickMsg`] schedules the next one. It keeps running while the countdown
//! is idle so a `start()` never waits for the clock to spin up; the owner
//! simply ignores ticks it has no use for.
//!
//! # Message Filtering
//!
//! Each clock has a unique id and a tag. Ticks addressed to another clock,
//! or carrying a stale tag, are rejected without re-arming. This keeps a
//! clock from ever having two tick chains in flight, which would double its
//! rate.
//!
//! ```rust
//! use countdown_ring::clock::Clock;
//! use std::time::Duration;
//!
//! let clock = Clock::new(Duration::from_millis(100));
//! let _first_tick = clock.init();
//! assert_eq!(clock.interval(), Duration::from_millis(100));
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Default tick cadence.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered once per clock period.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Id of the clock that scheduled this tick.
    pub id: i64,
    /// Period that elapsed before this tick was delivered.
    pub elapsed: Duration,
    tag: i64,
}

/// A periodic tick source.
#[derive(Debug, Clone)]
pub struct Clock {
    interval: Duration,
    id: i64,
    tag: i64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl Clock {
    /// Creates a clock firing every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            id: next_id(),
            tag: 0,
        }
    }

    /// Unique id of this clock.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The tick period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedules the first tick.
    pub fn init(&self) -> Cmd {
        self.schedule()
    }

    /// Accepts a tick addressed to this clock.
    ///
    /// Returns the command scheduling the next tick, or `None` when the
    /// message is not a tick for this clock (foreign id, stale tag, or not a
    /// tick at all).
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;
        if !self.accepts(tick) {
            return None;
        }

        self.tag += 1;
        Some(self.schedule())
    }

    /// Whether `tick` belongs to the chain this clock currently runs.
    pub fn accepts(&self, tick: &TickMsg) -> bool {
        tick.id == self.id && tick.tag == self.tag
    }

    fn schedule(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let elapsed = self.interval;

        bubbletea_tick(self.interval, move |_| {
            Box::new(TickMsg { id, elapsed, tag }) as Msg
        })
    }
}

/// Builds the tick `clock` is currently waiting for.
///
/// Lets tests and embedding applications drive a widget without a running
/// scheduler.
pub fn pending_tick(clock: &Clock) -> TickMsg {
    TickMsg {
        id: clock.id,
        elapsed: clock.interval,
        tag: clock.tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids() {
        let a = Clock::new(DEFAULT_INTERVAL);
        let b = Clock::new(DEFAULT_INTERVAL);
        assert_ne!(a.id(), b.id());
        assert!(a.id() > 0);
    }

    #[test]
    fn test_default_interval() {
        let clock = Clock::default();
        assert_eq!(clock.interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_accepts_own_tick_and_rearms() {
        let mut clock = Clock::new(Duration::from_millis(50));
        let tick = pending_tick(&clock);
        assert_eq!(tick.elapsed, Duration::from_millis(50));

        let result = clock.update(&(Box::new(tick) as Msg));
        assert!(result.is_some());
        assert_eq!(clock.tag, 1);
    }

    #[test]
    fn test_rejects_stale_tag() {
        let mut clock = Clock::new(DEFAULT_INTERVAL);
        let stale = pending_tick(&clock);
        clock.update(&(Box::new(stale.clone()) as Msg));

        let result = clock.update(&(Box::new(stale) as Msg));
        assert!(result.is_none());
        assert_eq!(clock.tag, 1);
    }

    #[test]
    fn test_rejects_foreign_id() {
        let mut clock = Clock::new(DEFAULT_INTERVAL);
        let other = Clock::new(DEFAULT_INTERVAL);

        let result = clock.update(&(Box::new(pending_tick(&other)) as Msg));
        assert!(result.is_none());
        assert_eq!(clock.tag, 0);
    }

    #[test]
    fn test_ignores_unrelated_messages() {
        let mut clock = Clock::default();
        let result = clock.update(&(Box::new("hello") as Msg));
        assert!(result.is_none());
    }

    #[test]
    fn test_pending_tick_matches_current_chain() {
        let mut clock = Clock::default();
        clock.update(&(Box::new(pending_tick(&clock)) as Msg));
        assert!(clock.accepts(&pending_tick(&clock)));
    }
}
