//! Spring-animated progress value.
//!
//! The countdown advances in discrete steps (one per clock tick) and jumps
//! back to zero on stop or expiry. Drawing those values directly makes the
//! arc stutter, so the ring draws [`Model::shown`] instead: a value that
//! chases the latest [`Model::set_percent`] target with a damped spring at
//! 60 frames per second.
//!
//! # Animation and Control
//!
//! ```rust
//! use countdown_ring::progress::{new, with_spring_options};
//!
//! let mut progress = new(&[with_spring_options(24.0, 1.2)]);
//!
//! // Returns the command that delivers the first animation frame.
//! let _frame = progress.set_percent(0.75);
//! assert_eq!(progress.percent(), 0.75);
//! assert_eq!(progress.shown(), 0.0);
//! assert!(progress.is_animating());
//! ```
//!
//! Frames are delivered as [`FrameMsg`] and must be routed back through
//! [`Model::update`]. A new target bumps an internal tag, so frames scheduled
//! for an older target are dropped and only one frame chain is ever live.

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

const FPS: u32 = 60;
const DEFAULT_FREQUENCY: f64 = 18.0;
const DEFAULT_DAMPING: f64 = 1.0;

/// Configuration options for the animator.
pub enum ProgressOption {
    /// Spring stiffness and damping.
    WithSpringOptions(f64, f64),
    /// Skip animation entirely; the shown value follows the target at once.
    WithoutAnimation,
}

impl ProgressOption {
    fn apply(&self, m: &mut Model) {
        match self {
            ProgressOption::WithSpringOptions(frequency, damping) => {
                m.set_spring_options(*frequency, *damping);
            }
            ProgressOption::WithoutAnimation => {
                m.animated = false;
            }
        }
    }
}

/// Sets the spring stiffness and damping.
///
/// Higher frequency moves faster; damping near `1.0` settles without
/// overshoot.
pub fn with_spring_options(frequency: f64, damping: f64) -> ProgressOption {
    ProgressOption::WithSpringOptions(frequency, damping)
}

/// Disables interpolation.
pub fn without_animation() -> ProgressOption {
    ProgressOption::WithoutAnimation
}

/// Animation frame for a specific animator.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    id: i64,
    tag: i64,
}

#[derive(Debug, Clone)]
struct Spring {
    frequency: f64,
    damping: f64,
    fps: f64,
}

impl Spring {
    fn new(fps: f64, frequency: f64, damping: f64) -> Self {
        Self {
            frequency,
            damping,
            fps,
        }
    }

    fn update(&self, position: f64, velocity: f64, target: f64) -> (f64, f64) {
        let dt = 1.0 / self.fps;
        let spring_force = -self.frequency * (position - target);
        let damping_force = -self.damping * velocity;
        let acceleration = spring_force + damping_force;

        let new_velocity = velocity + acceleration * dt;
        let new_position = position + new_velocity * dt;

        (new_position, new_velocity)
    }
}

/// Animated progress value.
#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    tag: i64,

    spring: Spring,
    animated: bool,
    percent_shown: f64,  // percent currently displaying
    target_percent: f64, // percent to which we're animating
    velocity: f64,
}

/// Creates an animator resting at zero.
pub fn new(opts: &[ProgressOption]) -> Model {
    let mut m = Model {
        id: next_id(),
        tag: 0,
        spring: Spring::new(FPS as f64, DEFAULT_FREQUENCY, DEFAULT_DAMPING),
        animated: true,
        percent_shown: 0.0,
        target_percent: 0.0,
        velocity: 0.0,
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m
}

impl Model {
    /// Replaces the spring parameters.
    pub fn set_spring_options(&mut self, frequency: f64, damping: f64) {
        self.spring = Spring::new(FPS as f64, frequency, damping);
    }

    /// The target value.
    pub fn percent(&self) -> f64 {
        self.target_percent
    }

    /// The value to draw this frame, always within `[0, 1]`.
    pub fn shown(&self) -> f64 {
        self.percent_shown.clamp(0.0, 1.0)
    }

    /// Sets a new target, clamped into `[0, 1]`, and starts a frame chain.
    ///
    /// Returns `None` when animation is disabled; the shown value then jumps
    /// straight to the target.
    pub fn set_percent(&mut self, p: f64) -> Option<Cmd> {
        self.target_percent = p.clamp(0.0, 1.0);
        self.tag += 1;

        if !self.animated {
            self.percent_shown = self.target_percent;
            self.velocity = 0.0;
            return None;
        }

        Some(self.next_frame())
    }

    /// Steps the spring on this animator's frames.
    ///
    /// Returns the next frame command while still moving, `None` at rest or
    /// for frames that belong to another animator or an older target.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let frame_msg = msg.downcast_ref::<FrameMsg>()?;
        if frame_msg.id != self.id || frame_msg.tag != self.tag {
            return None;
        }

        // If we've more or less reached equilibrium, stop updating.
        if !self.is_animating() {
            self.percent_shown = self.target_percent;
            self.velocity = 0.0;
            return None;
        }

        let (new_percent, new_velocity) =
            self.spring
                .update(self.percent_shown, self.velocity, self.target_percent);
        self.percent_shown = new_percent;
        self.velocity = new_velocity;

        Some(self.next_frame())
    }

    /// Whether the shown value is still travelling toward the target.
    pub fn is_animating(&self) -> bool {
        let dist = (self.percent_shown - self.target_percent).abs();
        !(dist < 0.001 && self.velocity.abs() < 0.01)
    }

    fn next_frame(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

        bubbletea_tick(duration, move |_| Box::new(FrameMsg { id, tag }) as Msg)
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(m: &Model) -> Msg {
        Box::new(FrameMsg {
            id: m.id,
            tag: m.tag,
        }) as Msg
    }

    #[test]
    fn test_new_rests_at_zero() {
        let progress = new(&[]);
        assert_eq!(progress.percent(), 0.0);
        assert_eq!(progress.shown(), 0.0);
        assert!(!progress.is_animating());
    }

    #[test]
    fn test_set_percent_clamps_and_bumps_tag() {
        let mut progress = new(&[]);

        std::mem::drop(progress.set_percent(1.5));
        assert_eq!(progress.percent(), 1.0);

        std::mem::drop(progress.set_percent(-0.5));
        assert_eq!(progress.percent(), 0.0);

        let original_tag = progress.tag;
        std::mem::drop(progress.set_percent(0.6));
        assert_eq!(progress.tag, original_tag + 1);
    }

    #[test]
    fn test_frames_move_toward_target() {
        let mut progress = new(&[]);
        std::mem::drop(progress.set_percent(0.5));

        let mut last = progress.shown();
        for _ in 0..10 {
            let msg = frame(&progress);
            assert!(progress.update(&msg).is_some());
            assert!(progress.shown() >= last);
            last = progress.shown();
        }
        assert!(last > 0.0 && last < 0.5);
    }

    #[test]
    fn test_settles_and_stops_rearming() {
        let mut progress = new(&[]);
        std::mem::drop(progress.set_percent(0.3));

        let mut frames = 0;
        loop {
            let msg = frame(&progress);
            if progress.update(&msg).is_none() {
                break;
            }
            frames += 1;
            assert!(frames < 10_000, "spring never settled");
        }
        assert!((progress.shown() - 0.3).abs() < 1e-9);
        assert!(!progress.is_animating());
    }

    #[test]
    fn test_rejects_stale_and_foreign_frames() {
        let mut progress = new(&[]);
        std::mem::drop(progress.set_percent(0.5));
        let stale = frame(&progress);
        std::mem::drop(progress.set_percent(0.7));

        assert!(progress.update(&stale).is_none());
        assert_eq!(progress.shown(), 0.0);

        let other = new(&[]);
        assert!(progress.update(&frame(&other)).is_none());
    }

    #[test]
    fn test_without_animation_jumps() {
        let mut progress = new(&[without_animation()]);
        assert!(progress.set_percent(0.4).is_none());
        assert_eq!(progress.shown(), 0.4);
        assert!(!progress.is_animating());
    }

    #[test]
    fn test_spring_options() {
        let progress = new(&[with_spring_options(25.0, 1.5)]);
        assert_eq!(progress.spring.frequency, 25.0);
        assert_eq!(progress.spring.damping, 1.5);
        assert_eq!(progress.spring.fps, FPS as f64);
    }

    #[test]
    fn test_spring_physics_step() {
        let spring = Spring::new(60.0, 10.0, 1.0);
        let (new_pos, _new_vel) = spring.update(0.0, 0.0, 1.0);
        assert!(new_pos > 0.0);
        assert!(new_pos < 1.0);
    }
}
