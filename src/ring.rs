//! Circular progress ring with a centred `MM:SS` readout.
//!
//! The ring is laid out on a character grid `2r + 1` rows tall and `4r + 1`
//! columns wide: terminal cells are roughly twice as tall as they are wide,
//! so horizontal distances count half. A cell belongs to the ring when its
//! distance from the centre is within half a cell of the radius.
//!
//! Two arcs share those cells, like two stacked circular indicators: a full
//! track underneath, and a progress arc on top that starts at 12 o'clock and
//! sweeps clockwise over the elapsed fraction. The arc takes the color of the
//! current [`ColorTier`]; [`Ring::render`] additionally fades between the
//! normal and warning colors by a `heat` value in `[0, 1]`.
//!
//! ```rust
//! use countdown_ring::format::{ColorTier, Readout};
//! use countdown_ring::ring::Ring;
//!
//! let ring = Ring::new(4);
//! let readout = Readout {
//!     display_progress: 0.25,
//!     tier: ColorTier::Normal,
//!     remaining_seconds: 90,
//!     running: true,
//! };
//! let view = ring.view(&readout, readout.display_progress, false);
//! assert_eq!(view.lines().count(), 9);
//! ```

use crate::config::RingConfig;
use crate::format::{ColorTier, Readout};
use lipgloss::blending::blend_1d;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::f64::consts::TAU;
use unicode_width::UnicodeWidthChar;

const ARC_CHAR: char = '●';
const TRACK_CHAR: char = '·';
const INCREASE_MARKER: char = '▲';
const DECREASE_MARKER: char = '▼';
/// Number of blended arc colors between the normal and warning colors.
pub const FADE_STEPS: usize = 16;

/// What occupies one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Track,
    Arc(ColorTier),
    Text(char),
    Marker(char),
}

/// Styles for each kind of cell.
#[derive(Debug, Clone)]
pub struct Styles {
    pub track: Style,
    pub normal: Style,
    pub warning: Style,
    pub text: Style,
    pub marker: Style,
    /// Arc styles from the normal color to the warning color.
    pub fade: Vec<Style>,
}

impl Default for Styles {
    fn default() -> Self {
        Self::from_config(&RingConfig::default())
    }
}

impl Styles {
    pub fn from_config(config: &RingConfig) -> Self {
        let fg = |color: &str| Style::new().foreground(lipgloss::Color::from(color));
        let fade = blend_1d(
            FADE_STEPS,
            vec![
                lipgloss::Color::from(config.normal_color.as_str()),
                lipgloss::Color::from(config.warning_color.as_str()),
            ],
        )
        .into_iter()
        .map(|color| Style::new().foreground(color))
        .collect();
        Self {
            track: fg(&config.track_color),
            normal: fg(&config.normal_color),
            warning: fg(&config.warning_color),
            text: fg(&config.text_color).bold(true),
            marker: fg(&config.track_color),
            fade,
        }
    }

    fn for_arc(&self, heat: f64) -> &Style {
        self.fade.get(fade_index(heat)).unwrap_or(&self.normal)
    }

    fn for_cell(&self, cell: Cell) -> Option<&Style> {
        match cell {
            Cell::Blank => None,
            Cell::Track => Some(&self.track),
            Cell::Arc(ColorTier::Normal) => Some(&self.normal),
            Cell::Arc(ColorTier::Warning) => Some(&self.warning),
            Cell::Text(_) => Some(&self.text),
            Cell::Marker(_) => Some(&self.marker),
        }
    }
}

/// The render surface. Holds geometry and styles only; every frame is drawn
/// from a [`Readout`] passed in by the caller.
#[derive(Debug, Clone)]
pub struct Ring {
    pub radius: u16,
    pub styles: Styles,
}

impl Default for Ring {
    fn default() -> Self {
        Self::from_config(&RingConfig::default())
    }
}

impl Ring {
    pub fn new(radius: u16) -> Self {
        Self {
            radius,
            styles: Styles::default(),
        }
    }

    pub fn from_config(config: &RingConfig) -> Self {
        Self {
            radius: config.radius,
            styles: Styles::from_config(config),
        }
    }

    /// Grid size as `(columns, rows)`.
    pub fn size(&self) -> (usize, usize) {
        let r = self.radius as usize;
        (4 * r + 1, 2 * r + 1)
    }

    /// Renders one frame with the arc in the tier's own color.
    ///
    /// `shown` is the progress to draw, usually an animated value chasing
    /// `readout.display_progress`. When `can_edit` is set, increase and
    /// decrease markers frame the minute and second fields.
    pub fn view(&self, readout: &Readout, shown: f64, can_edit: bool) -> String {
        let heat = match readout.tier {
            ColorTier::Normal => 0.0,
            ColorTier::Warning => 1.0,
        };
        self.render(readout, shown, heat, can_edit)
    }

    /// Like [`view`](Self::view), but colors the arc by `heat`: `0` is the
    /// normal color, `1` the warning color, anything between a blend.
    pub fn render(&self, readout: &Readout, shown: f64, heat: f64, can_edit: bool) -> String {
        self.layout(readout, shown, can_edit)
            .iter()
            .map(|row| self.render_row(row, heat))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Places ring, readout and markers on the grid.
    pub fn layout(&self, readout: &Readout, shown: f64, can_edit: bool) -> Vec<Vec<Cell>> {
        let (width, height) = self.size();
        let r = self.radius as f64;
        let shown = shown.clamp(0.0, 1.0);
        let mut grid = vec![vec![Cell::Blank; width]; height];

        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                let y = row as f64 - r;
                let x = (col as f64 - 2.0 * r) / 2.0;
                if ((x * x + y * y).sqrt() - r).abs() > 0.5 {
                    continue;
                }
                *cell = if sweep_fraction(x, y) < shown {
                    Cell::Arc(readout.tier)
                } else {
                    Cell::Track
                };
            }
        }

        let label = readout.label();
        let label_width = label.chars().count();
        let centre_row = self.radius as usize;
        let start = (width / 2).saturating_sub(label_width / 2);
        for (i, ch) in label.chars().enumerate() {
            if let Some(cell) = grid[centre_row].get_mut(start + i) {
                *cell = Cell::Text(ch);
            }
        }

        if can_edit && centre_row >= 1 {
            // Minutes take everything before ":SS".
            let minutes_col = start + (label_width - 3).saturating_sub(1) / 2;
            let seconds_col = start + label_width - 2;
            for col in [minutes_col, seconds_col] {
                let rows = [
                    (centre_row - 1, INCREASE_MARKER),
                    (centre_row + 1, DECREASE_MARKER),
                ];
                for (row, marker) in rows {
                    // Labels wider than the ring lose the markers that fall outside.
                    if let Some(cell) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                        *cell = Cell::Marker(marker);
                    }
                }
            }
        }

        grid
    }

    fn render_row(&self, cells: &[Cell], heat: f64) -> String {
        let mut out = String::new();
        let mut run = String::new();
        let mut run_cell: Option<Cell> = None;

        for &cell in cells {
            let same_style = match run_cell {
                Some(prev) => same_run(prev, cell),
                None => false,
            };
            if !same_style {
                if let Some(prev) = run_cell {
                    out.push_str(&self.paint(prev, &run, heat));
                }
                run.clear();
                run_cell = Some(cell);
            }
            run.push(glyph(cell));
        }
        if let Some(prev) = run_cell {
            out.push_str(&self.paint(prev, &run, heat));
        }
        out
    }

    fn paint(&self, cell: Cell, text: &str, heat: f64) -> String {
        if let Cell::Arc(_) = cell {
            return self.styles.for_arc(heat).render(text);
        }
        match self.styles.for_cell(cell) {
            Some(style) => style.render(text),
            None => text.to_string(),
        }
    }
}

// Clockwise angle from 12 o'clock as a fraction of a full turn, in [0, 1).
fn sweep_fraction(x: f64, y: f64) -> f64 {
    let angle = x.atan2(-y);
    let angle = if angle < 0.0 { angle + TAU } else { angle };
    angle / TAU
}

fn fade_index(heat: f64) -> usize {
    let heat = if heat.is_nan() { 0.0 } else { heat.clamp(0.0, 1.0) };
    (heat * (FADE_STEPS - 1) as f64).round() as usize
}

fn same_run(a: Cell, b: Cell) -> bool {
    match (a, b) {
        (Cell::Text(_), Cell::Text(_)) | (Cell::Marker(_), Cell::Marker(_)) => true,
        _ => a == b,
    }
}

fn glyph(cell: Cell) -> char {
    let ch = match cell {
        Cell::Blank => ' ',
        Cell::Track => TRACK_CHAR,
        Cell::Arc(_) => ARC_CHAR,
        Cell::Text(ch) | Cell::Marker(ch) => ch,
    };
    // Wide glyphs would shear the grid.
    if ch.width().unwrap_or(0) == 1 {
        ch
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readout(seconds: u64, progress: f64) -> Readout {
        Readout {
            display_progress: progress,
            tier: ColorTier::for_progress(progress),
            remaining_seconds: seconds,
            running: progress > 0.0,
        }
    }

    fn count(grid: &[Vec<Cell>], pred: impl Fn(Cell) -> bool) -> usize {
        grid.iter().flatten().filter(|c| pred(**c)).count()
    }

    fn is_arc(cell: Cell) -> bool {
        matches!(cell, Cell::Arc(_))
    }

    fn plain(s: &str) -> String {
        strip_ansi_escapes::strip_str(s)
    }

    #[test]
    fn test_size_follows_radius() {
        assert_eq!(Ring::new(8).size(), (33, 17));
        assert_eq!(Ring::new(3).size(), (13, 7));
    }

    #[test]
    fn test_empty_progress_draws_only_track() {
        let ring = Ring::new(6);
        let grid = ring.layout(&readout(120, 0.0), 0.0, true);
        assert_eq!(count(&grid, is_arc), 0);
        assert!(count(&grid, |c| c == Cell::Track) > 0);
    }

    #[test]
    fn test_full_progress_covers_whole_ring() {
        let ring = Ring::new(6);
        let empty = ring.layout(&readout(0, 0.0), 0.0, false);
        let full = ring.layout(&readout(0, 1.0), 1.0, false);

        assert_eq!(count(&full, |c| c == Cell::Track), 0);
        assert_eq!(
            count(&full, is_arc),
            count(&empty, |c| c == Cell::Track)
        );
    }

    #[test]
    fn test_arc_grows_monotonically() {
        let ring = Ring::new(8);
        let mut last = 0;
        for step in 0..=20 {
            let p = step as f64 / 20.0;
            let grid = ring.layout(&readout(60, p), p, false);
            let arcs = count(&grid, is_arc);
            assert!(arcs >= last, "arc shrank at {}", p);
            last = arcs;
        }
    }

    #[test]
    fn test_quarter_arc_is_top_right() {
        let ring = Ring::new(8);
        let grid = ring.layout(&readout(60, 0.25), 0.25, false);
        let (width, _) = ring.size();

        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if is_arc(*cell) {
                    assert!(col >= width / 2, "arc cell left of centre at {},{}", row, col);
                    assert!(row <= 8, "arc cell below centre at {},{}", row, col);
                }
            }
        }
    }

    #[test]
    fn test_arc_carries_tier() {
        let ring = Ring::new(5);
        let grid = ring.layout(&readout(10, 0.9), 0.9, false);
        assert!(count(&grid, |c| c == Cell::Arc(ColorTier::Warning)) > 0);
        assert_eq!(count(&grid, |c| c == Cell::Arc(ColorTier::Normal)), 0);
    }

    #[test]
    fn test_label_is_centred() {
        let ring = Ring::new(8);
        let view = plain(&ring.view(&readout(125, 0.0), 0.0, false));
        let centre = view.lines().nth(8).unwrap();
        assert_eq!(centre.trim_matches(|c| c == ' ' || c == TRACK_CHAR), "02:05");
    }

    #[test]
    fn test_markers_only_when_editable() {
        let ring = Ring::new(8);
        let editable = ring.layout(&readout(60, 0.0), 0.0, true);
        let locked = ring.layout(&readout(60, 0.0), 0.0, false);

        assert_eq!(count(&editable, |c| c == Cell::Marker(INCREASE_MARKER)), 2);
        assert_eq!(count(&editable, |c| c == Cell::Marker(DECREASE_MARKER)), 2);
        assert_eq!(count(&locked, |c| matches!(c, Cell::Marker(_))), 0);
    }

    #[test]
    fn test_rows_have_constant_visible_width() {
        let ring = Ring::new(6);
        for p in [0.0, 0.3, 1.0] {
            let view = plain(&ring.view(&readout(30, p), p, p == 0.0));
            let widths: Vec<usize> = view.lines().map(|l| l.chars().count()).collect();
            assert_eq!(widths.len(), 13);
            assert!(widths.iter().all(|w| *w == 25));
        }
    }

    #[test]
    fn test_long_label_on_small_ring_does_not_panic() {
        let ring = Ring::new(1);
        let grid = ring.layout(&readout(60_000, 0.0), 0.0, true);
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|row| row.len() == 5));

        let view = plain(&ring.view(&readout(60_000, 0.0), 0.0, true));
        assert_eq!(view.lines().count(), 3);
    }

    #[test]
    fn test_zero_radius_renders_single_cell() {
        let ring = Ring::new(0);
        let grid = ring.layout(&readout(90, 0.0), 0.0, true);
        assert_eq!(grid, vec![vec![Cell::Text('0')]]);
    }

    #[test]
    fn test_fade_index_spans_both_ends() {
        assert_eq!(fade_index(0.0), 0);
        assert_eq!(fade_index(1.0), FADE_STEPS - 1);
        assert_eq!(fade_index(-3.0), 0);
        assert_eq!(fade_index(7.0), FADE_STEPS - 1);
        assert_eq!(fade_index(f64::NAN), 0);
        assert!(fade_index(0.5) > 0 && fade_index(0.5) < FADE_STEPS - 1);
    }

    #[test]
    fn test_arc_color_follows_heat_not_tier() {
        let ring = Ring::new(5);
        let mut warning = readout(10, 0.9);
        let cold = ring.render(&warning, 0.9, 0.0, false);

        warning.tier = ColorTier::Normal;
        assert_eq!(ring.render(&warning, 0.9, 0.0, false), cold);
        assert_eq!(ring.styles.fade.len(), FADE_STEPS);
    }

    #[test]
    fn test_sweep_fraction_directions() {
        assert!(sweep_fraction(0.0, -1.0).abs() < 1e-12);
        assert!((sweep_fraction(1.0, 0.0) - 0.25).abs() < 1e-12);
        assert!((sweep_fraction(0.0, 1.0) - 0.5).abs() < 1e-12);
        assert!((sweep_fraction(-1.0, 0.0) - 0.75).abs() < 1e-12);
    }
}
