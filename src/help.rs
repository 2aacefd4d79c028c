//! Help line listing the active key bindings.
//!
//! The short view is a single line of `key description` pairs separated by
//! bullets; the full view lays each binding group out as a column. Disabled
//! bindings are skipped, so the help automatically hides edit keys while the
//! countdown runs. When a width is set, content that would overflow is
//! replaced by an ellipsis.

use crate::key;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help views.
#[derive(Debug, Clone)]
pub struct Styles {
    pub ellipsis: Style,
    pub short_key: Style,
    pub short_desc: Style,
    pub short_separator: Style,
    pub full_key: Style,
    pub full_desc: Style,
    pub full_separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            short_key: key_style.clone(),
            short_desc: desc_style.clone(),
            short_separator: sep_style.clone(),
            full_key: key_style,
            full_desc: desc_style,
            full_separator: sep_style,
        }
    }
}

/// Help view state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Render the full multi-column help instead of the single line.
    pub show_all: bool,
    /// Maximum width in cells; `0` means unlimited.
    pub width: usize,

    pub short_separator: String,
    pub full_separator: String,
    pub ellipsis: String,

    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the short or full help for `keymap`, depending on `show_all`.
    pub fn view<K: key::KeyMap>(&self, keymap: &K) -> String {
        if self.show_all {
            self.full_help_view(keymap.full_help())
        } else {
            self.short_help_view(keymap.short_help())
        }
    }

    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        if bindings.is_empty() {
            return String::new();
        }

        let mut builder = String::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .short_separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        for kb in bindings.iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };

            let help = kb.help();
            let key_part = self.styles.short_key.clone().inline(true).render(&help.key);
            let desc_part = self
                .styles
                .short_desc
                .clone()
                .inline(true)
                .render(&help.desc);
            let item_str = format!("{}{} {}", sep, key_part, desc_part);

            let item_width = lipgloss::width_visible(&item_str);

            if let Some(tail) = self.should_add_item(total_width, item_width) {
                builder.push_str(&tail);
                break;
            }

            total_width += item_width;
            builder.push_str(&item_str);
        }
        builder
    }

    pub fn full_help_view(&self, groups: Vec<Vec<&key::Binding>>) -> String {
        if groups.is_empty() {
            return String::new();
        }

        let mut columns = Vec::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .full_separator
            .clone()
            .inline(true)
            .render(&self.full_separator);
        let separator_width = lipgloss::width_visible(&separator);

        for group in groups.iter() {
            if !should_render_column(group) {
                continue;
            }

            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| {
                    let help = b.help();
                    let key_part = self.styles.full_key.clone().inline(true).render(&help.key);
                    let desc_part = self
                        .styles
                        .full_desc
                        .clone()
                        .inline(true)
                        .render(&help.desc);
                    format!("{} {}", key_part, desc_part)
                })
                .collect();

            let col_str = rows.join("\n");
            let col_width = rows
                .iter()
                .map(|r| lipgloss::width_visible(r))
                .max()
                .unwrap_or(0);
            let gap = if columns.is_empty() { 0 } else { separator_width };

            if let Some(tail) = self.should_add_item(total_width, gap + col_width) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }

            total_width += gap + col_width;
            columns.push(col_str);
        }

        let mut result_parts = Vec::new();
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                result_parts.push(separator.as_str());
            }
            result_parts.push(col.as_str());
        }

        lipgloss::join_horizontal(lipgloss::TOP, &result_parts)
    }

    // Some(tail) when the item does not fit; the tail is an ellipsis if even
    // that fits, otherwise empty.
    fn should_add_item(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width > 0 && total_width + item_width > self.width {
            let tail = format!(
                " {}",
                self.styles
                    .ellipsis
                    .clone()
                    .inline(true)
                    .render(&self.ellipsis)
            );
            if total_width + lipgloss::width_visible(&tail) < self.width {
                return Some(tail);
            }
            return Some(String::new());
        }
        None
    }
}

/// Whether a group has at least one enabled binding.
pub fn should_render_column(bindings: &[&key::Binding]) -> bool {
    bindings.iter().any(|b| b.enabled())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Binding, KeyMap};
    use crossterm::event::KeyCode;

    struct TestKeys {
        start: Binding,
        minute: Binding,
        quit: Binding,
    }

    impl TestKeys {
        fn new() -> Self {
            Self {
                start: Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "start"),
                minute: Binding::new(vec![KeyCode::Up]).with_help("↑", "+1 min"),
                quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            }
        }
    }

    impl KeyMap for TestKeys {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.start, &self.minute, &self.quit]
        }

        fn full_help(&self) -> Vec<Vec<&Binding>> {
            vec![vec![&self.start], vec![&self.minute], vec![&self.quit]]
        }
    }

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    #[test]
    fn test_short_help_lists_enabled_bindings() {
        let keys = TestKeys::new();
        let view = plain(&Model::new().view(&keys));
        assert_eq!(view, "space start • ↑ +1 min • q quit");
    }

    #[test]
    fn test_short_help_skips_disabled() {
        let mut keys = TestKeys::new();
        keys.minute.set_enabled(false);
        let view = plain(&Model::new().view(&keys));
        assert_eq!(view, "space start • q quit");
    }

    #[test]
    fn test_short_help_truncates_with_ellipsis() {
        let keys = TestKeys::new();
        let view = plain(&Model::new().with_width(16).view(&keys));
        assert!(view.starts_with("space start"));
        assert!(view.ends_with('…'));
        assert!(!view.contains("quit"));
    }

    #[test]
    fn test_full_help_skips_disabled_columns() {
        let mut keys = TestKeys::new();
        keys.minute.set_enabled(false);
        let mut help = Model::new();
        help.show_all = true;

        let view = plain(&help.view(&keys));
        assert!(view.contains("space start"));
        assert!(view.contains("q quit"));
        assert!(!view.contains("+1 min"));
    }

    #[test]
    fn test_empty_bindings_render_nothing() {
        let help = Model::new();
        assert_eq!(help.short_help_view(Vec::new()), "");
        assert_eq!(help.full_help_view(Vec::new()), "");
        assert!(!should_render_column(&[]));
    }
}
