//! Rendering components for the player.
//!
//! [`draw_frame`] lays out one full screen: header, stage, caption,
//! progress bar and footer, plus the help overlay when it is open. It reads
//! only the controller's [`ViewState`] and never touches timers.

mod caption;
mod filter;
mod help;
mod progress;
mod scene;
mod stage;

pub use caption::{caption_lines, display_text, render_caption, truncate_to_width};
pub use filter::SceneFilter;
pub use help::{help_box_height, help_lines, render_help, HELP_BOX_WIDTH, HELP_CLOSE_HINT};
pub use progress::{
    build_progress_bar_chars, format_duration, progress_line, render_progress_bar,
    scene_boundaries,
};
pub use scene::{Decorations, NeonSign, SceneKind, NEON_SIGN_LINES, SPEECH_BUBBLE_LINES};
pub use stage::{render_stage, Stage, VIEW_HEIGHT, VIEW_WIDTH};

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::catalog::{SceneCatalog, STORY_TITLE};
use crate::player::state::{ViewState, ViewerState};
use crate::tui::footer::{render_footer, KeyHint};
use crate::tui::theme::Theme;

/// Shared inputs for every frame that do not change during playback.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub catalog: &'a SceneCatalog,
    pub theme: &'a Theme,
    /// Transliterate all text to ASCII
    pub ascii: bool,
}

/// Footer hints while a scene is playing.
const PLAYING_KEYS: [KeyHint; 3] = [
    KeyHint::new("r", "replay"),
    KeyHint::new("?", "help"),
    KeyHint::new("q", "quit"),
];

/// Footer hints once playback has stopped; replay is called out.
const STOPPED_KEYS: [KeyHint; 3] = [
    KeyHint::new("r", "replay").highlighted(),
    KeyHint::new("?", "help"),
    KeyHint::new("q", "quit"),
];

/// Footer hints for the given playback state.
pub fn footer_keys(is_playing: bool) -> &'static [KeyHint] {
    if is_playing {
        &PLAYING_KEYS
    } else {
        &STOPPED_KEYS
    }
}

/// Right-hand header label: scene position, or why nothing is playing.
pub fn scene_label(view: &ViewState) -> String {
    if view.scene_count == 0 {
        "No scenes".to_string()
    } else if view.is_playing {
        format!("Scene {}/{}", view.scene_index + 1, view.scene_count)
    } else {
        "The end".to_string()
    }
}

fn render_header(frame: &mut Frame, area: Rect, view: &ViewState, ctx: &RenderContext) {
    let [title_area, label_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(14)]).areas(area);

    let title = truncate_to_width(
        &display_text(STORY_TITLE, ctx.ascii),
        title_area.width.saturating_sub(1) as usize,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(title, ctx.theme.accent_bold_style()),
        ])),
        title_area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{} ", scene_label(view)),
            ctx.theme.text_secondary_style(),
        ))
        .alignment(Alignment::Right),
        label_area,
    );
}

/// Draw one complete frame.
///
/// `anim_ms` drives the free-running decorations (dancers, blinking bulbs)
/// and is independent of playback progress.
pub fn draw_frame(
    frame: &mut Frame,
    view: &ViewState,
    viewer: &ViewerState,
    ctx: &RenderContext,
    anim_ms: f64,
) {
    let [header, stage_area, caption, progress, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, view, ctx);

    match view.active_scene {
        Some(scene) => {
            let kind = SceneKind::from_id(&scene.id);
            let stage = Stage::new(kind, view.global_progress, anim_ms, ctx.ascii);
            render_stage(frame, stage_area, stage);
        }
        None => frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(ctx.theme.text_secondary_style()),
            stage_area,
        ),
    }

    render_caption(frame, caption, view.active_scene, ctx.ascii, ctx.theme);
    render_progress_bar(
        frame,
        progress,
        view.global_progress,
        ctx.catalog.total_duration_ms(),
        &scene_boundaries(ctx.catalog.offsets()),
        ctx.theme,
    );
    render_footer(frame, footer, footer_keys(view.is_playing), ctx.theme);

    if viewer.show_help {
        render_help(frame, frame.area(), ctx.theme);
    }
}
