//! Key presses to countdown intents.
//!
//! The input surface only ever emits [`Intent`]s; it never touches the
//! countdown state. Which intents it may emit depends on [`Capabilities`]:
//! while the countdown runs the edit bindings are disabled, so they neither
//! match nor show up in help.

use crate::key::{self, Binding, KeyPress};
use crate::timer::State;
use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// Seconds added or removed by the minute bindings.
pub const MINUTE_STEP: i64 = 60;
/// Seconds added or removed by the second bindings.
pub const SECOND_STEP: i64 = 1;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Start when idle, stop (and reset) when running.
    Toggle,
    /// Change the pending duration by this many seconds.
    AdjustDuration(i64),
    ToggleHelp,
    Quit,
}

/// Affordances the input surface may present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_edit: bool,
}

impl Capabilities {
    pub fn of(state: &State) -> Self {
        Self {
            can_edit: !state.is_running(),
        }
    }
}

/// The widget's key bindings.
#[derive(Debug, Clone)]
pub struct InputMap {
    pub toggle: Binding,
    pub add_minute: Binding,
    pub sub_minute: Binding,
    pub add_second: Binding,
    pub sub_second: Binding,
    pub help: Binding,
    pub quit: Binding,
}

impl Default for InputMap {
    fn default() -> Self {
        Self {
            toggle: Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter])
                .with_help("space", "start/stop"),
            add_minute: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "+1 min"),
            sub_minute: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "-1 min"),
            add_second: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "+1 sec"),
            sub_second: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "-1 sec"),
            help: Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            quit: Binding::new(vec![
                KeyPress::from(KeyCode::Char('q')),
                KeyPress::from(KeyCode::Esc),
                KeyPress::from((KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ])
            .with_help("q", "quit"),
        }
    }
}

impl InputMap {
    /// Enables or disables the edit bindings.
    pub fn apply(&mut self, caps: Capabilities) {
        for binding in self.edit_bindings_mut() {
            binding.set_enabled(caps.can_edit);
        }
    }

    /// Resolves a key press to an intent.
    pub fn intent_for(&self, msg: &KeyMsg) -> Option<Intent> {
        if self.quit.matches(msg) {
            return Some(Intent::Quit);
        }
        if self.toggle.matches(msg) {
            return Some(Intent::Toggle);
        }
        if self.help.matches(msg) {
            return Some(Intent::ToggleHelp);
        }

        let steps = [
            (&self.add_minute, MINUTE_STEP),
            (&self.sub_minute, -MINUTE_STEP),
            (&self.add_second, SECOND_STEP),
            (&self.sub_second, -SECOND_STEP),
        ];
        steps
            .iter()
            .find(|(binding, _)| binding.matches(msg))
            .map(|(_, delta)| Intent::AdjustDuration(*delta))
    }

    fn edit_bindings_mut(&mut self) -> [&mut Binding; 4] {
        [
            &mut self.add_minute,
            &mut self.sub_minute,
            &mut self.add_second,
            &mut self.sub_second,
        ]
    }
}

impl key::KeyMap for InputMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.toggle, &self.add_minute, &self.add_second, &self.help, &self.quit]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.toggle],
            vec![&self.add_minute, &self.sub_minute],
            vec![&self.add_second, &self.sub_second],
            vec![&self.help, &self.quit],
        ]
    }
}
