//! Help overlay rendering for the player.
//!
//! Displays a centered help box with all available keyboard shortcuts.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::theme::Theme;
use crate::tui::ui::centered_box;

/// Keyboard shortcuts listed in the overlay, grouped by section.
pub const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Playback",
        &[("r / Enter", "Replay from the first scene")],
    ),
    (
        "General",
        &[
            ("?", "Show this help"),
            ("q / Esc", "Quit"),
            ("Ctrl+C", "Quit"),
        ],
    ),
];

/// Closing hint at the bottom of the box.
pub const HELP_CLOSE_HINT: &str = "Press any key to close";

/// Width of the help box including borders.
pub const HELP_BOX_WIDTH: u16 = 44;

/// Width of the key column.
const KEY_COLUMN: usize = 12;

/// Lines inside the help box.
pub fn help_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];
    for (section, keys) in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(
            format!(" {}", section),
            theme.accent_bold_style(),
        )));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("   {:<width$}", key, width = KEY_COLUMN), theme.accent_style()),
                Span::styled(desc.to_string(), theme.text_style()),
            ]));
        }
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(Span::styled(
        format!("{:^width$}", HELP_CLOSE_HINT, width = HELP_BOX_WIDTH as usize - 2),
        theme.text_secondary_style(),
    )));
    lines
}

/// Height of the help box including borders.
pub fn help_box_height() -> u16 {
    let rows: usize = HELP_SECTIONS.iter().map(|(_, keys)| keys.len() + 2).sum();
    // Leading blank, close hint, two borders
    (rows + 4) as u16
}

/// Render the help overlay centered in `area`.
pub fn render_help(frame: &mut Frame, area: Rect, theme: &Theme) {
    let rect = centered_box(HELP_BOX_WIDTH, help_box_height(), area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .title(Span::styled(" Help ", theme.accent_bold_style()));
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(help_lines(theme)).block(block), rect);
}
