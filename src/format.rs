//! Derives what the ring shows from the countdown state.

use crate::timer::State;

/// Progress at or above which the arc switches to the warning color.
pub const WARNING_THRESHOLD: f64 = 0.8;

/// Color classification of the progress arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTier {
    Normal,
    Warning,
}

impl ColorTier {
    pub fn for_progress(progress: f64) -> Self {
        if progress >= WARNING_THRESHOLD {
            ColorTier::Warning
        } else {
            ColorTier::Normal
        }
    }
}

/// Everything the render surface needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    /// Elapsed fraction in `[0, 1]`. Renderers may animate toward it.
    pub display_progress: f64,
    pub tier: ColorTier,
    /// Remaining time rounded up to whole seconds.
    pub remaining_seconds: u64,
    pub running: bool,
}

impl Readout {
    pub fn of(state: &State) -> Self {
        let progress = state.progress();
        Self {
            display_progress: progress,
            tier: ColorTier::for_progress(progress),
            remaining_seconds: whole_seconds(state.remaining_secs()),
            running: state.is_running(),
        }
    }

    /// `MM:SS` label for the remaining time.
    pub fn label(&self) -> String {
        clock_label(self.remaining_seconds)
    }
}

/// Rounds fractional seconds up, so a countdown shows `00:01` until it
/// actually reaches zero.
pub fn whole_seconds(secs: f64) -> u64 {
    if secs <= 0.0 {
        0
    } else {
        secs.ceil() as u64
    }
}

/// Splits whole seconds into minutes and seconds.
pub fn split_minutes(seconds: u64) -> (u64, u64) {
    (seconds / 60, seconds % 60)
}

/// Formats whole seconds as `MM:SS`. Minutes grow past two digits as needed.
pub fn clock_label(seconds: u64) -> String {
    let (minutes, seconds) = split_minutes(seconds);
    format!("{:02}:{:02}", minutes, seconds)
}
