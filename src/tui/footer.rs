//! Footer bar with keybinding hints.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub key: &'static str,
    pub desc: &'static str,
    /// Drawn in reverse video to draw the eye
    pub highlighted: bool,
}

impl KeyHint {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self {
            key,
            desc,
            highlighted: false,
        }
    }

    pub const fn highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }
}

/// Render a centered footer with keybinding hints.
///
/// Example: `[r: replay, q: quit]` renders as `"r: replay | q: quit"`.
pub fn render_footer(frame: &mut Frame, area: Rect, keys: &[KeyHint], theme: &Theme) {
    let spans = build_footer_spans(keys, theme);
    let footer = Paragraph::new(Line::from(spans))
        .style(theme.text_secondary_style())
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Build styled spans for footer keybinding hints.
///
/// Each key is highlighted with the theme accent color, descriptions use
/// the secondary text color, and entries are separated by " | ".
pub fn build_footer_spans(keys: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, hint) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.text_secondary_style()));
        }
        let (key_style, desc_style) = if hint.highlighted {
            let bold = Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED);
            (bold, bold)
        } else {
            (theme.accent_style(), theme.text_secondary_style())
        };
        spans.push(Span::styled(hint.key, key_style));
        spans.push(Span::styled(format!(": {}", hint.desc), desc_style));
    }
    spans
}
