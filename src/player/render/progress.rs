//! Progress bar rendering for the player.
//!
//! Displays overall vignette progress with a tick at every scene boundary.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme::Theme;

/// Character for the unfilled part of the bar.
const BAR_EMPTY: char = '─';
/// Character for the filled part of the bar.
const BAR_FILLED: char = '━';
/// Playhead character.
const PLAYHEAD: char = '⏺';
/// Scene boundary tick.
const SCENE_TICK: char = '┼';

/// Format a duration in milliseconds to MM:SS format.
///
/// # Arguments
/// * `millis` - Duration in milliseconds
///
/// # Returns
/// A string in MM:SS format
pub fn format_duration(millis: f64) -> String {
    let total_secs = (millis / 1000.0) as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Build the progress bar character array.
///
/// Creates a visual representation of the progress bar including
/// the playhead position and scene boundary ticks.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `progress` - Global progress in `[0, 1]`
/// * `boundaries` - Scene boundaries as fractions of the total duration
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_progress_bar_chars(
    bar_width: usize,
    progress: f64,
    boundaries: &[f64],
) -> (Vec<char>, usize) {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec![BAR_EMPTY; bar_width];

    if filled < bar_width {
        bar[filled] = PLAYHEAD;
    }

    for &boundary in boundaries {
        let pos = (boundary.clamp(0.0, 1.0) * bar_width as f64) as usize;
        if pos > 0 && pos < bar_width && bar[pos] != PLAYHEAD {
            bar[pos] = SCENE_TICK;
        }
    }

    (bar, filled)
}

/// Scene boundaries (start of every scene after the first) as fractions.
pub fn scene_boundaries(offsets: &[u64]) -> Vec<f64> {
    let Some(&total) = offsets.last() else {
        return Vec::new();
    };
    if total == 0 || offsets.len() < 3 {
        return Vec::new();
    }
    offsets[1..offsets.len() - 1]
        .iter()
        .map(|&offset| offset as f64 / total as f64)
        .collect()
}

/// Build the styled progress line: bar followed by `MM:SS/MM:SS`.
pub fn progress_line(
    width: u16,
    progress: f64,
    total_ms: u64,
    boundaries: &[f64],
    theme: &Theme,
) -> Line<'static> {
    let time_display = format!(
        " {}/{}",
        format_duration(progress.clamp(0.0, 1.0) * total_ms as f64),
        format_duration(total_ms as f64)
    );
    // Padding on the left plus the time display on the right
    let bar_width = (width as usize).saturating_sub(1 + time_display.chars().count());
    let (bar, filled) = build_progress_bar_chars(bar_width, progress, boundaries);

    let filled_style = Style::default().fg(theme.progress_fill);
    let empty_style = Style::default().fg(theme.progress_empty);
    let tick_style = Style::default().fg(theme.accent);

    let mut spans = Vec::with_capacity(bar_width + 2);
    spans.push(Span::raw(" "));
    for (i, &c) in bar.iter().enumerate() {
        let span = if c == SCENE_TICK {
            Span::styled(c.to_string(), tick_style)
        } else if i < filled {
            Span::styled(BAR_FILLED.to_string(), filled_style)
        } else if i == filled {
            Span::styled(c.to_string(), theme.text_style())
        } else {
            Span::styled(c.to_string(), empty_style)
        };
        spans.push(span);
    }
    spans.push(Span::styled(time_display, theme.text_secondary_style()));

    Line::from(spans)
}

/// Render the progress bar into `area`.
pub fn render_progress_bar(
    frame: &mut Frame,
    area: Rect,
    progress: f64,
    total_ms: u64,
    boundaries: &[f64],
    theme: &Theme,
) {
    let line = progress_line(area.width, progress, total_ms, boundaries, theme);
    frame.render_widget(Paragraph::new(line), area);
}
