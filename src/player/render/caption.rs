//! Scene caption: bold title over a dimmed subtitle.

use deunicode::deunicode;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::catalog::SceneDescriptor;
use crate::tui::theme::Theme;

/// Text as shown on screen, transliterated to ASCII when requested.
pub fn display_text(text: &str, ascii: bool) -> String {
    if ascii {
        deunicode(text)
    } else {
        text.to_string()
    }
}

/// Truncate `text` to at most `max_width` display columns, adding an
/// ellipsis when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Title and subtitle lines for a scene.
pub fn caption_lines(
    scene: &SceneDescriptor,
    width: u16,
    ascii: bool,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let max = width as usize;
    let title = truncate_to_width(&display_text(&scene.title, ascii), max);
    let subtitle = truncate_to_width(&display_text(&scene.subtitle, ascii), max);
    vec![
        Line::from(Span::styled(title, theme.accent_bold_style())),
        Line::from(Span::styled(subtitle, theme.text_secondary_style())),
    ]
}

/// Render the caption centred in `area`. Nothing is drawn without a scene.
pub fn render_caption(
    frame: &mut Frame,
    area: Rect,
    scene: Option<&SceneDescriptor>,
    ascii: bool,
    theme: &Theme,
) {
    let Some(scene) = scene else {
        return;
    };
    let lines = caption_lines(scene, area.width, ascii, theme);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
