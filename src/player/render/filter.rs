//! Colour filter overlay.
//!
//! Each scene is tinted by a filter blended over the stage. The club
//! interior's filter intensifies as the vignette progresses.

use ratatui::style::Color;

use super::scene::SceneKind;

/// Tint applied over the stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneFilter {
    /// Golden afternoon light
    Warm,
    /// Desaturated teal/orange film look
    Cinematic,
    /// Magenta street glow
    Neon,
    /// Pulsing dance-floor light; opacity grows with progress
    Dance { opacity: f64 },
    /// No tint
    None,
}

impl SceneFilter {
    /// Filter for a scene at the given global progress.
    pub fn for_scene(kind: SceneKind, progress: f64) -> Self {
        match kind {
            SceneKind::Market => Self::Warm,
            SceneKind::Conversation | SceneKind::Invitation => Self::Cinematic,
            SceneKind::ClubExterior => Self::Neon,
            SceneKind::ClubInterior => Self::Dance {
                opacity: 0.6 + progress.clamp(0.0, 1.0) * 0.34,
            },
            SceneKind::Unknown => Self::None,
        }
    }

    /// Tint colour and blend strength, or `None` for no tint.
    fn tint(self) -> Option<((u8, u8, u8), f64)> {
        match self {
            Self::Warm => Some(((255, 176, 92), 0.22)),
            Self::Cinematic => Some(((40, 72, 96), 0.28)),
            Self::Neon => Some(((255, 31, 143), 0.25)),
            Self::Dance { opacity } => Some(((180, 60, 255), 0.4 * opacity)),
            Self::None => None,
        }
    }

    /// Blend `base` towards this filter's tint.
    pub fn apply(self, base: (u8, u8, u8)) -> Color {
        let (r, g, b) = match self.tint() {
            Some((tint, strength)) => blend(base, tint, strength),
            None => base,
        };
        Color::Rgb(r, g, b)
    }
}

fn blend(base: (u8, u8, u8), tint: (u8, u8, u8), strength: f64) -> (u8, u8, u8) {
    let s = strength.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - s) + b as f64 * s).round() as u8;
    (mix(base.0, tint.0), mix(base.1, tint.1), mix(base.2, tint.2))
}
