//! Stage illustration.
//!
//! Draws the market backdrop, the vendor and the scene-specific props on a
//! braille canvas. Coordinates follow a 640x360 view box with y pointing
//! down, like the artwork they were traced from; [`flip`] converts to the
//! canvas' y-up space. Every colour passes through the active scene filter.

use std::f64::consts::TAU;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Circle, Context, Line, Rectangle},
        Block, Borders,
    },
    Frame,
};

use super::caption::display_text;
use super::filter::SceneFilter;
use super::scene::{Decorations, NeonSign, SceneKind, NEON_SIGN_LINES, SPEECH_BUBBLE_LINES};

/// View box width.
pub const VIEW_WIDTH: f64 = 640.0;
/// View box height.
pub const VIEW_HEIGHT: f64 = 360.0;

/// Vertical step between scanlines when filling shapes.
const FILL_STEP: f64 = 3.0;

type Rgb = (u8, u8, u8);

const SKY: Rgb = (26, 37, 64);
const GROUND: Rgb = (38, 38, 38);
const STALL: Rgb = (63, 44, 35);
const STALL_ROOF: Rgb = (90, 61, 46);
const STOOL: Rgb = (124, 83, 63);
const BENCH: Rgb = (81, 78, 74);
const LANTERN_LIT: Rgb = (255, 210, 125);
const LANTERN_DIM: Rgb = (110, 94, 66);
const SKIN: Rgb = (244, 201, 158);
const BLOUSE: Rgb = (192, 57, 107);
const APRON: Rgb = (238, 111, 155);
const INK: Rgb = (14, 14, 14);
const SMILE: Rgb = (173, 31, 86);
const SMILE_DIM: Rgb = (96, 40, 60);
const HAIR: Rgb = (53, 36, 28);
const HAIR_DARK: Rgb = (24, 16, 12);
const BUBBLE: Rgb = (250, 250, 250);
const BUBBLE_TEXT: Rgb = (49, 29, 68);
const NEON_PINK: Rgb = (255, 79, 175);
const NEON_PALE: Rgb = (255, 224, 245);
const NEON_TEXT: Rgb = (255, 143, 209);
const FOREGROUND: Rgb = (27, 27, 27);
const DANCER_SKIN: Rgb = (248, 217, 181);
const DANCER_ARMS: Rgb = (247, 247, 247);
const DANCER_COLORS: [Rgb; 3] = [(255, 117, 195), (114, 246, 255), (255, 229, 128)];

/// Everything the stage needs for one draw.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub kind: SceneKind,
    pub filter: SceneFilter,
    /// Free-running animation time (dancers, blinking bulbs)
    pub anim_ms: f64,
    /// Transliterate in-picture text to ASCII
    pub ascii: bool,
}

impl Stage {
    pub fn new(kind: SceneKind, progress: f64, anim_ms: f64, ascii: bool) -> Self {
        Self {
            kind,
            filter: SceneFilter::for_scene(kind, progress),
            anim_ms,
            ascii,
        }
    }

    fn color(&self, rgb: Rgb) -> Color {
        self.filter.apply(rgb)
    }

    fn paint(&self, ctx: &mut Context) {
        let decorations = self.kind.decorations();

        fill_rect(ctx, 0.0, 220.0, VIEW_WIDTH, 140.0, self.color(GROUND));
        self.paint_market(ctx, &decorations);
        self.paint_vendor(ctx, &decorations);
        ctx.layer();

        if decorations.speech_bubble {
            self.paint_speech_bubble(ctx);
        }
        if let Some(sign) = decorations.neon_sign {
            self.paint_neon_sign(ctx, sign);
        }
        fill_rect(ctx, 0.0, 300.0, VIEW_WIDTH, 60.0, self.color(FOREGROUND));
        if decorations.dancers {
            ctx.layer();
            for (i, (x, delay)) in [(180.0, 0.0), (260.0, 0.4), (340.0, 0.2)].into_iter().enumerate() {
                self.paint_dancer(ctx, x, delay, DANCER_COLORS[i]);
            }
        }
    }

    fn paint_market(&self, ctx: &mut Context, decorations: &Decorations) {
        fill_rect(ctx, 40.0, 160.0, 200.0, 80.0, self.color(STALL));
        fill_rect(ctx, 50.0, 140.0, 180.0, 30.0, self.color(STALL_ROOF));
        let lantern = if decorations.lantern_lit {
            LANTERN_LIT
        } else {
            LANTERN_DIM
        };
        fill_circle(ctx, 140.0, 135.0, 10.0, self.color(lantern));
        fill_rect(ctx, 70.0, 220.0, 40.0, 50.0, self.color(STOOL));
        fill_rect(ctx, 160.0, 220.0, 40.0, 50.0, self.color(STOOL));
        for (x, width) in [(260.0, 80.0), (360.0, 90.0)] {
            outline_rect(ctx, x, 240.0, width, 30.0, self.color(BENCH));
        }
    }

    fn paint_vendor(&self, ctx: &mut Context, decorations: &Decorations) {
        // Vendor is anchored at (140, 200) in the view box
        let (cx, cy) = (140.0, 200.0);
        let hair = if decorations.hair_bun_dark {
            HAIR_DARK
        } else {
            HAIR
        };
        fill_circle(ctx, cx, cy - 96.0, 24.0, self.color(hair));
        fill_circle(ctx, cx, cy - 60.0, 28.0, self.color(SKIN));
        fill_rect(ctx, cx - 28.0, cy - 40.0, 56.0, 65.0, self.color(BLOUSE));
        fill_rect(ctx, cx - 25.0, cy - 5.0, 50.0, 60.0, self.color(APRON));
        for dx in [-10.0, 10.0] {
            fill_circle(ctx, cx + dx, cy - 64.0, 4.0, self.color(INK));
        }
        let smile = if decorations.smiling { SMILE } else { SMILE_DIM };
        draw_arc(ctx, cx, cy - 52.0, 18.0, 6.0, self.color(smile));
    }

    fn paint_speech_bubble(&self, ctx: &mut Context) {
        let (x, y) = (320.0, 70.0);
        let bubble = self.color(BUBBLE);
        outline_rect(ctx, x, y, 220.0, 120.0, bubble);
        draw_line(ctx, x + 60.0, y + 120.0, x + 90.0, y + 150.0, bubble);
        draw_line(ctx, x + 100.0, y + 120.0, x + 90.0, y + 150.0, bubble);

        let text_color = self.color(BUBBLE_TEXT);
        let style = Style::default().fg(text_color).bg(bubble);
        for (i, line) in SPEECH_BUBBLE_LINES.iter().enumerate() {
            let style = if i == 0 {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            };
            let text = display_text(line, self.ascii);
            ctx.print(x + 20.0, flip(y + 40.0 + i as f64 * 28.0), TextLine::styled(text, style));
        }
    }

    fn paint_neon_sign(&self, ctx: &mut Context, sign: NeonSign) {
        let (x, y) = (360.0, 60.0);
        let (stroke, text) = match sign {
            NeonSign::Exterior => (NEON_PINK, NEON_TEXT),
            NeonSign::Interior => (NEON_PALE, NEON_PALE),
        };
        outline_rect(ctx, x - 50.0, y - 30.0, 220.0, 140.0, self.color(stroke));
        outline_rect(ctx, x - 40.0, y - 20.0, 200.0, 120.0, self.color(stroke));

        let headline = Style::default()
            .fg(self.color(text))
            .add_modifier(Modifier::BOLD);
        ctx.print(
            x + 35.0,
            flip(y + 36.0),
            TextLine::styled(display_text(NEON_SIGN_LINES[0], self.ascii), headline),
        );
        ctx.print(
            x + 40.0,
            flip(y + 72.0),
            TextLine::styled(
                display_text(NEON_SIGN_LINES[1], self.ascii),
                Style::default().fg(self.color(text)),
            ),
        );

        if sign == NeonSign::Interior {
            // Two bulbs blinking out of phase
            for (bx, period_ms, offset_ms) in [(x, 2000.0, 0.0), (x + 140.0, 1500.0, 500.0)] {
                if pulse(self.anim_ms - offset_ms, period_ms) > 0.5 {
                    fill_circle(ctx, bx, y, 6.0, self.color((255, 232, 246)));
                }
            }
        }
    }

    fn paint_dancer(&self, ctx: &mut Context, x: f64, delay_s: f64, dress: Rgb) {
        let y = 280.0;
        let t = self.anim_ms / 1000.0;
        let sway = (TAU * (t - delay_s) / 2.6).sin() * 6f64.to_radians();
        let arm_bob = (TAU * (t - delay_s - 0.2) / 1.9).sin() * 4.0;

        fill_circle(ctx, x, y - 60.0, 16.0, self.color(DANCER_SKIN));

        // Dress swings around the waist at (x, y - 40)
        let pivot = (x, y - 40.0);
        let rotate = |px: f64, py: f64| {
            let (dx, dy) = (px - pivot.0, py - pivot.1);
            (
                pivot.0 + dx * sway.cos() - dy * sway.sin(),
                pivot.1 + dx * sway.sin() + dy * sway.cos(),
            )
        };
        let dress_color = self.color(dress);
        let outline = [rotate(-20.0 + x, y - 50.0), rotate(20.0 + x, y - 50.0), rotate(20.0 + x, y), rotate(-20.0 + x, y)];
        for i in 0..outline.len() {
            let (a, b) = (outline[i], outline[(i + 1) % outline.len()]);
            draw_line(ctx, a.0, a.1, b.0, b.1, dress_color);
        }
        draw_line(ctx, outline[0].0, outline[0].1, outline[2].0, outline[2].1, dress_color);
        draw_line(ctx, outline[1].0, outline[1].1, outline[3].0, outline[3].1, dress_color);

        draw_line(
            ctx,
            x - 30.0,
            y - 20.0 - arm_bob,
            x + 30.0,
            y - 20.0 + arm_bob,
            self.color(DANCER_ARMS),
        );
    }
}

/// Convert a view-box y (down) to canvas y (up).
pub fn flip(y: f64) -> f64 {
    VIEW_HEIGHT - y
}

/// Square-ish pulse between 0 and 1 with the given period.
fn pulse(t_ms: f64, period_ms: f64) -> f64 {
    0.5 + 0.5 * (TAU * t_ms / period_ms).sin()
}

fn draw_line(ctx: &mut Context, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
    ctx.draw(&Line {
        x1,
        y1: flip(y1),
        x2,
        y2: flip(y2),
        color,
    });
}

fn outline_rect(ctx: &mut Context, x: f64, y: f64, width: f64, height: f64, color: Color) {
    ctx.draw(&Rectangle {
        x,
        y: flip(y + height),
        width,
        height,
        color,
    });
}

fn fill_rect(ctx: &mut Context, x: f64, y: f64, width: f64, height: f64, color: Color) {
    let mut row = y;
    while row <= y + height {
        draw_line(ctx, x, row, x + width, row, color);
        row += FILL_STEP;
    }
}

fn fill_circle(ctx: &mut Context, cx: f64, cy: f64, radius: f64, color: Color) {
    ctx.draw(&Circle {
        x: cx,
        y: flip(cy),
        radius,
        color,
    });
    let mut dy = -radius;
    while dy <= radius {
        let half = (radius * radius - dy * dy).max(0.0).sqrt();
        draw_line(ctx, cx - half, cy + dy, cx + half, cy + dy, color);
        dy += FILL_STEP;
    }
}

/// Downward-curving arc (a smile) centred on `cx`, `half_width` wide each side.
fn draw_arc(ctx: &mut Context, cx: f64, cy: f64, half_width: f64, depth: f64, color: Color) {
    const SEGMENTS: usize = 8;
    let point = |i: usize| {
        let t = i as f64 / SEGMENTS as f64 * 2.0 - 1.0;
        (cx + t * half_width, cy + depth * (1.0 - t * t))
    };
    for i in 0..SEGMENTS {
        let (a, b) = (point(i), point(i + 1));
        draw_line(ctx, a.0, a.1, b.0, b.1, color);
    }
}

/// Render the stage into `area`.
pub fn render_stage(frame: &mut Frame, area: Rect, stage: Stage) {
    let border = Style::default().fg(Color::DarkGray);
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).border_style(border))
        .marker(Marker::Braille)
        .background_color(stage.color(SKY))
        .x_bounds([0.0, VIEW_WIDTH])
        .y_bounds([0.0, VIEW_HEIGHT])
        .paint(move |ctx| stage.paint(ctx));
    frame.render_widget(canvas, area);
}
