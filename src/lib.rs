#![doc(html_root_url = "https://docs.rs/countdown-ring/")]

//! # countdown-ring
//!
//! A terminal countdown timer widget for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: set a duration, start or stop it, and watch a circular
//! progress ring fill as time elapses, turning from green to red near expiry.
//!
//! ## Overview
//!
//! The widget is split along the Elm Architecture seams so each piece can be
//! tested and reused on its own:
//!
//! - [`timer`]: the countdown state machine (target, remaining, running, progress)
//! - [`clock`]: a self re-arming tick source
//! - [`format`]: pure derivation of progress, color tier and `MM:SS` label
//! - [`progress`]: spring interpolation of the drawn progress
//! - [`ring`]: the ring renderer
//! - [`input`], [`key`], [`help`]: key bindings, intents and the help line
//! - [`app`]: [`Countdown`], the bubbletea model tying it together
//! - [`config`]: TOML configuration with defaults
//!
//! ## State machine
//!
//! ```rust
//! use countdown_ring::prelude::*;
//! use std::time::Duration;
//!
//! let mut state = TimerState::new(Duration::from_secs(120));
//! state.start();
//! state.tick(Duration::from_secs(96));
//!
//! let readout = Readout::of(&state);
//! assert_eq!(readout.tier, ColorTier::Warning);
//! assert_eq!(readout.label(), "00:24");
//! ```
//!
//! Stopping discards the elapsed time; the next start counts the full target
//! again:
//!
//! ```rust
//! use countdown_ring::prelude::*;
//! use std::time::Duration;
//!
//! let mut state = TimerState::new(Duration::from_secs(60));
//! state.start();
//! state.tick(Duration::from_secs(20));
//! state.pause();
//! assert_eq!(state.remaining(), Duration::from_secs(60));
//! assert_eq!(state.progress(), 0.0);
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model, Msg};
//! use countdown_ring::prelude::*;
//!
//! struct App {
//!     countdown: Countdown,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let countdown = Countdown::default();
//!         let cmd = countdown.start();
//!         (Self { countdown }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod format;
pub mod help;
pub mod input;
pub mod key;
pub mod progress;
pub mod ring;
pub mod timer;

pub use app::Countdown;
pub use clock::{Clock, TickMsg as ClockTickMsg};
pub use config::{Config, ConfigError};
pub use format::{clock_label, ColorTier, Readout, WARNING_THRESHOLD};
pub use input::{Capabilities, InputMap, Intent};
pub use key::{Binding, KeyMap, KeyPress};
pub use ring::Ring;
pub use timer::{Phase, State as TimerState, TickOutcome};

/// Prelude module for convenient imports.
///
/// ```rust
/// use countdown_ring::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::Countdown;
    pub use crate::clock::{Clock, TickMsg as ClockTickMsg};
    pub use crate::config::Config;
    pub use crate::format::{clock_label, ColorTier, Readout};
    pub use crate::input::{Capabilities, Intent};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::ring::Ring;
    pub use crate::timer::{Phase, State as TimerState, TickOutcome};
}
