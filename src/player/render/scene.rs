//! Scene-id dispatch for the renderer.
//!
//! The controller treats scene ids as opaque strings. The renderer resolves
//! them once per draw into a [`SceneKind`], and everything scene-specific
//! (which props are lit, which overlays are shown) is derived from that.

/// Known scenes of the shipped story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Market,
    Conversation,
    Invitation,
    ClubExterior,
    ClubInterior,
    /// Any id the renderer has no special treatment for
    Unknown,
}

impl SceneKind {
    /// Resolve a scene id.
    pub fn from_id(id: &str) -> Self {
        match id {
            "market" => Self::Market,
            "conversation" => Self::Conversation,
            "invitation" => Self::Invitation,
            "club-exterior" => Self::ClubExterior,
            "club-interior" => Self::ClubInterior,
            _ => Self::Unknown,
        }
    }

    /// Props and overlays drawn for this scene.
    pub fn decorations(self) -> Decorations {
        Decorations {
            lantern_lit: self == Self::Market,
            smiling: matches!(self, Self::Conversation | Self::Invitation),
            hair_bun_dark: self == Self::ClubInterior,
            speech_bubble: self == Self::Invitation,
            neon_sign: match self {
                Self::ClubExterior => Some(NeonSign::Exterior),
                Self::ClubInterior => Some(NeonSign::Interior),
                _ => None,
            },
            dancers: self == Self::ClubInterior,
        }
    }
}

/// How the club sign is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeonSign {
    /// Seen from the street: hot pink outline
    Exterior,
    /// Seen from the dance floor: pale outline with blinking bulbs
    Interior,
}

/// Scene-specific props on top of the shared market backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorations {
    /// Stall lantern glowing brightly (dim otherwise)
    pub lantern_lit: bool,
    /// Vendor's smile emphasised
    pub smiling: bool,
    /// Vendor's hair bun drawn dark (club lighting)
    pub hair_bun_dark: bool,
    /// Invitation speech bubble
    pub speech_bubble: bool,
    /// Club sign, if visible
    pub neon_sign: Option<NeonSign>,
    /// Three dancers on the floor
    pub dancers: bool,
}

/// Lines of the vendor's invitation bubble.
pub const SPEECH_BUBBLE_LINES: [&str; 3] = [
    "Cầm tay mình nè!",
    "Chiều nay, vô Khiêu vũ",
    "Hoa Hoa cho vui nhé?",
];

/// Club sign headline and tagline.
pub const NEON_SIGN_LINES: [&str; 2] = ["HOA HOA", "Khiêu Vũ"];
