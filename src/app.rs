//! The countdown widget as a bubbletea model.
//!
//! [`Countdown`] owns the single [`State`] and routes every message to it:
//! clock ticks advance it, key presses become intents, animation frames move
//! the drawn progress. After any change it pushes the new progress into the
//! animator and the ring draws from there. A second animator fades the arc
//! color when the tier changes, and window resizes narrow the help line.
//!
//! # bubbletea-rs Integration
//!
//! ```rust,no_run
//! use bubbletea_rs::Program;
//! use countdown_ring::app::Countdown;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let program = Program::<Countdown>::builder().alt_screen(true).build()?;
//! program.run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Embedding in a larger model works the same way as any other widget:
//! call [`Countdown::start`] from `init`, forward messages to
//! [`Countdown::update`] and place [`Countdown::view`] in your layout.

use crate::clock::{Clock, TickMsg};
use crate::config::Config;
use crate::format::{ColorTier, Readout};
use crate::help;
use crate::input::{Capabilities, InputMap, Intent};
use crate::progress;
use crate::ring::Ring;
use crate::timer::{State, TickOutcome};
use bubbletea_rs::{batch, quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};

/// Countdown widget: state, clock, animator, input map and renderers.
#[derive(Debug, Clone)]
pub struct Countdown {
    state: State,
    clock: Clock,
    progress: progress::Model,
    tier_fade: progress::Model,
    input: InputMap,
    help: help::Model,
    ring: Ring,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Countdown {
    /// Mounts a widget with `config`'s default duration, idle.
    pub fn new(config: &Config) -> Self {
        let mut opts = vec![progress::with_spring_options(
            config.animation.frequency,
            config.animation.damping,
        )];
        if !config.animation.enabled {
            opts.push(progress::without_animation());
        }

        let mut widget = Self {
            state: State::new(config.timer.default_duration()),
            clock: Clock::new(config.timer.tick_interval()),
            progress: progress::new(&opts),
            tier_fade: progress::new(&opts),
            input: InputMap::default(),
            help: help::Model::new(),
            ring: Ring::from_config(&config.ring),
        };
        widget.sync_capabilities();
        widget
    }

    /// Starts the clock. The countdown itself stays idle.
    pub fn start(&self) -> Cmd {
        self.clock.init()
    }

    /// The countdown state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The tick source driving this widget.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Derived display values for the current state.
    pub fn readout(&self) -> Readout {
        Readout::of(&self.state)
    }

    /// What the input surface currently allows.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::of(&self.state)
    }

    /// The progress currently drawn, possibly mid-animation.
    pub fn shown_progress(&self) -> f64 {
        self.progress.shown()
    }

    /// The arc color blend drawn this frame: `0` normal, `1` warning.
    pub fn shown_heat(&self) -> f64 {
        self.tier_fade.shown()
    }

    /// Whether the full help is showing.
    pub fn help_expanded(&self) -> bool {
        self.help.show_all
    }

    /// Applies an intent directly, as a key press would.
    pub fn apply(&mut self, intent: Intent) -> Option<Cmd> {
        let changed = match intent {
            Intent::Quit => return Some(quit()),
            Intent::ToggleHelp => {
                self.help.show_all = !self.help.show_all;
                return None;
            }
            Intent::Toggle => self.state.toggle(),
            Intent::AdjustDuration(delta) => self.state.adjust_duration(delta),
        };

        if !changed {
            return None;
        }
        self.sync_capabilities();
        self.animate()
    }

    /// Handles clock ticks, key presses, window resizes and animation frames.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if msg.downcast_ref::<TickMsg>().is_some() {
            return self.on_tick(&msg);
        }

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.help.width = size.width as usize;
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            let intent = self.input.intent_for(key_msg)?;
            tracing::trace!(?intent, "key intent");
            return self.apply(intent);
        }

        self.progress
            .update(&msg)
            .or_else(|| self.tier_fade.update(&msg))
    }

    /// Ring, status line and help.
    pub fn view(&self) -> String {
        let readout = self.readout();
        let caps = self.capabilities();
        let status = if readout.running { "running" } else { "ready" };

        format!(
            "{}\n\n{}\n\n{}",
            self.ring.render(
                &readout,
                self.progress.shown(),
                self.tier_fade.shown(),
                caps.can_edit
            ),
            status,
            self.help.view(&self.input)
        )
    }

    fn on_tick(&mut self, msg: &Msg) -> Option<Cmd> {
        let elapsed = msg.downcast_ref::<TickMsg>()?.elapsed;
        // Rejected ticks belong to a dead chain; acting on them would double
        // the countdown rate.
        let next_tick = self.clock.update(msg)?;

        match self.state.tick(elapsed) {
            TickOutcome::Ignored => Some(next_tick),
            TickOutcome::Counted => Some(self.with_animation(next_tick)),
            TickOutcome::Expired => {
                self.sync_capabilities();
                Some(self.with_animation(next_tick))
            }
        }
    }

    fn with_animation(&mut self, cmd: Cmd) -> Cmd {
        match self.animate() {
            Some(frame) => batch(vec![cmd, frame]),
            None => cmd,
        }
    }

    fn animate(&mut self) -> Option<Cmd> {
        let readout = self.readout();
        let mut frames: Vec<Cmd> = self
            .progress
            .set_percent(readout.display_progress)
            .into_iter()
            .collect();

        let heat = match readout.tier {
            ColorTier::Normal => 0.0,
            ColorTier::Warning => 1.0,
        };
        // Only restart the fade when the tier actually flips.
        if self.tier_fade.percent() != heat {
            frames.extend(self.tier_fade.set_percent(heat));
        }

        match frames.len() {
            0 => None,
            1 => frames.pop(),
            _ => Some(batch(frames)),
        }
    }

    fn sync_capabilities(&mut self) {
        let caps = self.capabilities();
        self.input.apply(caps);
    }
}

impl BubbleTeaModel for Countdown {
    fn init() -> (Self, Option<Cmd>) {
        let widget = Countdown::new(&Config::current());
        let cmd = widget.start();
        (widget, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}
